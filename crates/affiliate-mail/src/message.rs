//! Rendered outgoing message

/// Plain-text message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingMail {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Value of the first `Label: value` line in the body
    pub fn field(&self, label: &str) -> Option<&str> {
        self.body.lines().find_map(|line| {
            line.trim()
                .strip_prefix(label)
                .and_then(|rest| rest.strip_prefix(':'))
                .map(str::trim)
        })
    }
}

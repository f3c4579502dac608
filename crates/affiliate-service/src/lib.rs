//! # affiliate-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AdminService, AffiliateService, ApplicationService, AuthService, DashboardService,
    HealthService, ProgramService, ReferralService, ReviewService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ServiceSettings, SettingsService,
};

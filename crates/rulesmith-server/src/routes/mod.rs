//! Rulesmith API Routes
//!
//! - /process_alerts - batch alert intake and rule optimization
//! - /swagger-ui - API documentation

pub mod alerts;
pub mod swagger;

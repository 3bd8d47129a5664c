// Standardized error codes returned to API clients

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const INVALID_FORMAT: &str = "VALIDATION_1003";
    pub const INVALID_DATE: &str = "VALIDATION_1004";
}

pub mod configuration {
    pub const INVALID_CONFIGURATION: &str = "CONFIG_2001";
}

pub mod server {
    pub const BIND_FAILED: &str = "SERVER_3001";
    pub const INTERNAL: &str = "SERVER_3002";
}

pub mod revenue {
    pub const SOURCE_UNAVAILABLE: &str = "REVENUE_5001";
}

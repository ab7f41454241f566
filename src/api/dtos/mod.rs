pub mod alert_dto;
pub mod common;
pub mod incident_dto;
pub mod notification_dto;
pub mod resource_dto;
pub mod volunteer_dto;

pub use alert_dto::*;
pub use common::*;
pub use incident_dto::*;
pub use notification_dto::*;
pub use resource_dto::*;
pub use volunteer_dto::*;

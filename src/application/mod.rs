mod alert_service;
pub mod fanout;
mod incident_service;
pub mod mapper;
mod notification_service;
mod resource_service;
pub mod targeting;
mod user_service;
mod volunteer_service;

pub use alert_service::AlertService;
pub use incident_service::IncidentService;
pub use notification_service::NotificationService;
pub use resource_service::ResourceService;
pub use user_service::UserService;
pub use volunteer_service::VolunteerService;

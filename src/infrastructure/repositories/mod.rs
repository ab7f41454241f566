mod alert_repository;
mod incident_repository;
mod notification_repository;
mod resource_repository;
mod traits;
mod user_repository;
mod volunteer_repository;

pub use alert_repository::AlertRepositoryImpl;
pub use incident_repository::IncidentRepositoryImpl;
pub use notification_repository::NotificationRepositoryImpl;
pub use resource_repository::ResourceRepositoryImpl;
pub use traits::{
    AlertFilter, AlertRepository, IncidentFilter, IncidentRepository, NotificationRepository,
    ResourceFilter, ResourceRepository, UserRepository, VolunteerRepository,
};
pub use user_repository::UserRepositoryImpl;
pub use volunteer_repository::VolunteerRepositoryImpl;

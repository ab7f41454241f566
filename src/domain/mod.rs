pub mod alert;
pub mod errors;
pub mod geo;
pub mod incident;
pub mod notification;
pub mod resource;
pub mod stats;
pub mod user;
pub mod volunteer;

pub use alert::{Alert, AlertType};
pub use errors::DomainError;
pub use geo::{distance_km, is_within_radius, retain_within, GeoPoint, Locatable, Location, TargetArea};
pub use incident::{derive_tags, Incident, IncidentStatus, IncidentType, Severity};
pub use notification::{Notification, NotificationType};
pub use resource::{Resource, ResourceStatus, ResourceType};
pub use user::{User, UserSummary};
pub use volunteer::{Availability, Volunteer};

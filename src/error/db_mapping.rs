use super::app_error::AppError;

pub(super) const CONNECT_FAILED: &str = "Unable to connect to database. Please try again later.";
pub(super) const TEMPORARILY_UNAVAILABLE: &str =
    "Service temporarily unavailable. Please try again later.";

/// Client-facing messages for the named constraints in the schema.
const CONSTRAINT_MESSAGES: &[(&str, &str)] = &[
    ("users_email_key", "email already registered"),
    ("volunteers_user_id_key", "user is already registered as a volunteer"),
    ("incidents_reported_by_fkey", "reporting user does not exist"),
    ("incidents_assigned_to_fkey", "assigned user does not exist"),
    ("resources_assigned_to_fkey", "referenced incident does not exist"),
    ("volunteers_user_id_fkey", "volunteer user does not exist"),
    ("volunteers_assigned_incident_fkey", "referenced incident does not exist"),
    ("alerts_created_by_fkey", "alert creator does not exist"),
    ("alerts_related_incident_fkey", "referenced incident does not exist"),
    ("notifications_user_id_fkey", "notification recipient does not exist"),
    ("resources_quantity_check", "quantity must not be negative"),
    ("resources_available_check", "available must not be negative"),
    ("alerts_target_radius_km_check", "radius must be positive"),
    (
        "alerts_target_area_complete",
        "target area needs latitude, longitude and radius together",
    ),
];

pub(super) fn constraint_message(constraint: Option<&str>) -> Option<&'static str> {
    let constraint = constraint?;
    CONSTRAINT_MESSAGES
        .iter()
        .find(|(name, _)| *name == constraint)
        .map(|(_, message)| *message)
}

/// Maps a Postgres SQLSTATE to a client-facing error. `None` keeps it an opaque database error.
pub(super) fn map_database_error(
    code: Option<&str>,
    constraint: Option<&str>,
    message: &str,
) -> Option<AppError> {
    let known = constraint_message(constraint);
    let mapped = match code? {
        "23505" => AppError::Conflict(known.unwrap_or("record already exists").to_string()),
        "23503" => AppError::BadRequest(
            known
                .unwrap_or("referenced record does not exist")
                .to_string(),
        ),
        "23514" => AppError::validation_error(known.unwrap_or("request violates validation rules")),
        "23502" => AppError::validation_error(
            not_null_column(message)
                .map(|column| format!("{column} is required"))
                .unwrap_or_else(|| "required field is missing".to_string()),
        ),
        "22P02" => AppError::validation_error("invalid input format"),
        "08001" | "08006" => AppError::database_unavailable(CONNECT_FAILED),
        "53300" => AppError::database_unavailable(TEMPORARILY_UNAVAILABLE),
        "40001" | "55P03" => {
            AppError::Conflict("record is busy, please retry".to_string())
        }
        _ => return None,
    };
    Some(mapped)
}

/// Pulls the column name out of `null value in column "x" ...`.
pub(super) fn not_null_column(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("column \"")?;
    let (column, _) = rest.split_once('"')?;
    Some(column)
}

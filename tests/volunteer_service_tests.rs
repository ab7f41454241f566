mod common;

use actix_rt::test;
use common::fixtures::{km_east, register_volunteer_request, test_incident, test_user, test_volunteer};
use common::Harness;
use relief_backend::api::dtos::{
    AssignVolunteerRequest, AvailableVolunteersQuery, UpdateVolunteerRequest, VolunteerQuery,
};
use relief_backend::domain::{Availability, IncidentStatus, NotificationType};
use relief_backend::error::AppError;
use uuid::Uuid;

#[test]
async fn register_creates_an_available_profile() {
    let harness = Harness::new();
    let user = test_user("helper@relief.test");
    harness.users.push(user.clone());

    let response = harness
        .volunteer_service()
        .register(user.id, register_volunteer_request(&["first-aid"]))
        .await
        .expect("registration should succeed");

    assert_eq!(response.user_id, user.id);
    assert_eq!(response.availability, Availability::Available);
    assert_eq!(response.skills, vec!["first-aid"]);
    assert_eq!(response.emergency_contact.name, "Sam");
    assert_eq!(response.user.map(|u| u.email), Some(user.email));
}

#[test]
async fn registering_twice_conflicts() {
    let harness = Harness::new();
    let user_id = Uuid::new_v4();
    let service = harness.volunteer_service();
    service
        .register(user_id, register_volunteer_request(&[]))
        .await
        .expect("first registration");

    let second = service
        .register(user_id, register_volunteer_request(&[]))
        .await;

    assert!(matches!(second, Err(AppError::Conflict(_))));
}

#[test]
async fn get_by_user_without_profile_is_not_found() {
    let harness = Harness::new();
    let result = harness.volunteer_service().get_by_user(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
async fn update_profile_changes_only_supplied_fields() {
    let harness = Harness::new();
    let volunteer = test_volunteer(Uuid::new_v4(), km_east(1.0), &["driving"]);
    harness.volunteers.push(volunteer.clone());

    let response = harness
        .volunteer_service()
        .update_profile(
            volunteer.user_id,
            UpdateVolunteerRequest {
                availability: Some(Availability::Unavailable),
                phone: Some("555-0177".to_string()),
                ..UpdateVolunteerRequest::default()
            },
        )
        .await
        .expect("update should succeed");

    assert_eq!(response.availability, Availability::Unavailable);
    assert_eq!(response.phone, "555-0177");
    assert_eq!(response.skills, vec!["driving"]);
    assert_eq!(response.emergency_contact.phone, volunteer.emergency_contact_phone);
}

#[test]
async fn update_profile_without_registration_is_not_found() {
    let harness = Harness::new();
    let result = harness
        .volunteer_service()
        .update_profile(Uuid::new_v4(), UpdateVolunteerRequest::default())
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
async fn assign_marks_busy_and_notifies_the_volunteer() {
    let harness = Harness::new();
    let user = test_user("assignee@relief.test");
    harness.users.push(user.clone());
    let volunteer = test_volunteer(user.id, km_east(1.0), &["first-aid"]);
    harness.volunteers.push(volunteer.clone());
    let incident = test_incident(Uuid::new_v4());
    harness.incidents.push(incident.clone());

    let response = harness
        .volunteer_service()
        .assign(
            volunteer.id,
            AssignVolunteerRequest {
                incident_id: incident.id,
            },
        )
        .await
        .expect("assignment should succeed");

    assert_eq!(response.availability, Availability::Busy);
    assert_eq!(response.assigned_incident, Some(incident.id));

    let sent = harness.notifications.for_user(user.id);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Assigned to Incident");
    assert_eq!(sent[0].notification_type, NotificationType::IncidentAssigned);
    assert_eq!(sent[0].related_id, Some(incident.id.to_string()));
}

#[test]
async fn assigned_volunteers_carry_the_incident_summary() {
    let harness = Harness::new();
    let assignee = test_volunteer(Uuid::new_v4(), km_east(1.0), &["first-aid"]);
    let idle = test_volunteer(Uuid::new_v4(), km_east(2.0), &["driving"]);
    harness.volunteers.push(assignee.clone());
    harness.volunteers.push(idle.clone());
    let incident = test_incident(Uuid::new_v4());
    harness.incidents.push(incident.clone());
    let service = harness.volunteer_service();

    service
        .assign(
            assignee.id,
            AssignVolunteerRequest {
                incident_id: incident.id,
            },
        )
        .await
        .expect("assignment should succeed");

    let profile = service
        .get_by_user(assignee.user_id)
        .await
        .expect("profile should exist");
    let summary = profile.incident.expect("assigned volunteer has an incident summary");
    assert_eq!(summary.title, "Warehouse fire");
    assert_eq!(summary.status, IncidentStatus::Reported);

    let listed = service
        .list(VolunteerQuery {
            availability: None,
            skills: None,
        })
        .await
        .expect("list");
    let assigned = listed.iter().find(|v| v.id == assignee.id).expect("assignee listed");
    assert_eq!(
        assigned.incident.as_ref().map(|i| i.title.as_str()),
        Some("Warehouse fire")
    );
    let unassigned = listed.iter().find(|v| v.id == idle.id).expect("idle listed");
    assert!(unassigned.incident.is_none());

    let json = serde_json::to_value(assigned).expect("serializable");
    assert_eq!(json["incident"]["title"], "Warehouse fire");
    assert_eq!(json["incident"]["status"], "reported");
}

#[test]
async fn assign_with_missing_volunteer_or_incident_is_not_found() {
    let harness = Harness::new();
    let volunteer = test_volunteer(Uuid::new_v4(), km_east(1.0), &[]);
    harness.volunteers.push(volunteer.clone());
    let incident = test_incident(Uuid::new_v4());
    harness.incidents.push(incident.clone());
    let service = harness.volunteer_service();

    let missing_incident = service
        .assign(
            volunteer.id,
            AssignVolunteerRequest {
                incident_id: Uuid::new_v4(),
            },
        )
        .await;
    assert!(matches!(missing_incident, Err(AppError::NotFound(_))));
    assert_eq!(
        harness.volunteers.get(volunteer.id).map(|v| v.availability),
        Some(Availability::Available)
    );

    let missing_volunteer = service
        .assign(
            Uuid::new_v4(),
            AssignVolunteerRequest {
                incident_id: incident.id,
            },
        )
        .await;
    assert!(matches!(missing_volunteer, Err(AppError::NotFound(_))));
    assert!(harness.notifications.all().is_empty());
}

#[test]
async fn list_filters_by_any_requested_skill() {
    let harness = Harness::new();
    let medic = test_volunteer(Uuid::new_v4(), km_east(1.0), &["first-aid", "cpr"]);
    let driver = test_volunteer(Uuid::new_v4(), km_east(1.0), &["driving"]);
    let cook = test_volunteer(Uuid::new_v4(), km_east(1.0), &["cooking"]);
    for volunteer in [medic.clone(), driver.clone(), cook] {
        harness.volunteers.push(volunteer);
    }
    let service = harness.volunteer_service();

    let matched = service
        .list(VolunteerQuery {
            availability: None,
            skills: Some("cpr, driving".to_string()),
        })
        .await
        .expect("list");
    let mut ids: Vec<Uuid> = matched.iter().map(|v| v.id).collect();
    ids.sort();
    let mut expected = vec![medic.id, driver.id];
    expected.sort();
    assert_eq!(ids, expected);

    let unfiltered = service
        .list(VolunteerQuery {
            availability: None,
            skills: Some(" ".to_string()),
        })
        .await
        .expect("list");
    assert_eq!(unfiltered.len(), 3);
}

#[test]
async fn available_by_skills_needs_availability_skill_and_proximity() {
    let harness = Harness::new();
    let near = test_volunteer(Uuid::new_v4(), km_east(5.0), &["search-rescue"]);
    let far = test_volunteer(Uuid::new_v4(), km_east(90.0), &["search-rescue"]);
    let mut busy = test_volunteer(Uuid::new_v4(), km_east(1.0), &["search-rescue"]);
    busy.availability = Availability::Busy;
    let unskilled = test_volunteer(Uuid::new_v4(), km_east(1.0), &["cooking"]);
    for volunteer in [near.clone(), far.clone(), busy, unskilled] {
        harness.volunteers.push(volunteer);
    }
    let service = harness.volunteer_service();

    let anywhere = service
        .available_by_skills(AvailableVolunteersQuery {
            skills: "search-rescue".to_string(),
            latitude: None,
            longitude: None,
            radius_km: None,
        })
        .await
        .expect("query");
    assert_eq!(anywhere.len(), 2);

    let close = service
        .available_by_skills(AvailableVolunteersQuery {
            skills: "search-rescue".to_string(),
            latitude: Some(0.0),
            longitude: Some(0.0),
            radius_km: Some(10.0),
        })
        .await
        .expect("query");
    assert_eq!(close.iter().map(|v| v.id).collect::<Vec<_>>(), vec![near.id]);

    let nobody = service
        .available_by_skills(AvailableVolunteersQuery {
            skills: String::new(),
            latitude: None,
            longitude: None,
            radius_km: None,
        })
        .await
        .expect("query");
    assert!(nobody.is_empty());
}

#[test]
async fn stats_report_availability_and_skill_distribution() {
    let harness = Harness::new();
    harness
        .volunteers
        .push(test_volunteer(Uuid::new_v4(), km_east(1.0), &["first-aid", "driving"]));
    let mut busy = test_volunteer(Uuid::new_v4(), km_east(1.0), &["first-aid"]);
    busy.availability = Availability::Busy;
    harness.volunteers.push(busy);

    let stats = harness.volunteer_service().stats().await.expect("stats");

    assert_eq!(stats.total, 2);
    assert_eq!(stats.by_availability["available"], 1);
    assert_eq!(stats.by_availability["busy"], 1);
    assert_eq!(stats.by_availability["unavailable"], 0);
    assert_eq!(stats.skills["first-aid"], 2);
    assert_eq!(stats.skills["driving"], 1);
    assert_eq!(stats.skills.len(), 2);
}

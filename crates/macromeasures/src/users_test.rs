use serde_json::json;

use super::*;

fn sample_response() -> UserResponse {
    serde_json::from_value(json!({
        "complete": true,
        "error": false,
        "message": "",
        "labels": {
            "jack": {
                "valid": true,
                "gender": { "confirmed": false, "label": "M", "updated": "1472083200" },
                "interests": {
                    "confirmed": false,
                    "updated": "1472083200",
                    "all": {
                        "10": {
                            "category": "Technology", "display": "Technology",
                            "level": "1", "name": "technology",
                            "parents": [], "score": 80, "useful": true
                        },
                        "11": {
                            "category": "Technology", "display": "Startups",
                            "level": "2", "name": "startups",
                            "parents": ["10"], "score": 65, "useful": true
                        },
                        "20": {
                            "category": "Business", "display": "Business",
                            "level": "1", "name": "business",
                            "parents": [], "score": 50, "useful": false
                        },
                        "21": {
                            "category": "Business", "display": "Venture Capital",
                            "level": "2", "name": "venture_capital",
                            "parents": ["11", "20", "999"], "score": 40, "useful": true
                        }
                    }
                },
                "language": {
                    "confirmed": false,
                    "updated": "1472083200",
                    "primary": { "iso_code": "en", "name": "English", "timestamp": "1472083200" },
                    "recent": [
                        { "iso_code": "en", "name": "English", "timestamp": "1472083200" }
                    ]
                },
                "location": {
                    "confirmed": false,
                    "updated": "1472083200",
                    "primary": {
                        "city": "San Francisco",
                        "country": { "code": "US", "name": "United States" },
                        "display": "San Francisco, California, United States",
                        "granularity": "city",
                        "latitude": 37.77,
                        "longitude": -122.42,
                        "subdivision": { "code": "CA", "name": "California" }
                    }
                },
                "platform": {
                    "confirmed": false,
                    "updated": 1472083200,
                    "primary": { "name": "iPhone", "timestamp": "1472083100" },
                    "recent": [
                        { "name": "iPhone", "timestamp": "1472083100" },
                        { "name": "Computer", "timestamp": "1471083100" }
                    ]
                },
                "type": { "confirmed": false, "personal": true, "updated": "1472083200" }
            },
            "acme_corp": {
                "valid": true,
                "gender": null,
                "interests": null,
                "language": null,
                "location": null,
                "platform": null,
                "type": { "confirmed": true, "personal": false, "updated": "1472083200" }
            }
        }
    }))
    .expect("fixture should decode")
}

#[test]
fn to_users_fails_with_provider_error() {
    let resp = UserResponse {
        complete: true,
        error: true,
        error_message: "invalid key".to_owned(),
        ..UserResponse::default()
    };
    let err = resp.to_users().unwrap_err();
    assert!(
        matches!(err, MacromeasuresError::Provider(ref m) if m == "invalid key"),
        "got: {err:?}"
    );
}

#[test]
fn provider_error_wins_over_labels() {
    let mut resp = sample_response();
    resp.error = true;
    assert!(matches!(
        resp.to_users(),
        Err(MacromeasuresError::Provider(_))
    ));
}

#[test]
fn to_users_fails_on_empty_labels() {
    let resp: UserResponse =
        serde_json::from_value(json!({ "complete": true, "error": false, "message": "", "labels": {} }))
            .unwrap();
    assert!(matches!(resp.to_users(), Err(MacromeasuresError::EmptyResult)));
}

#[test]
fn null_labels_count_as_empty() {
    let resp: UserResponse =
        serde_json::from_value(json!({ "complete": true, "error": false, "labels": null })).unwrap();
    assert!(matches!(resp.to_users(), Err(MacromeasuresError::EmptyResult)));
}

#[test]
fn to_users_yields_one_record_per_label() {
    let resp = sample_response();
    let users = resp.to_users().unwrap();

    assert_eq!(users.len(), resp.labels.len());
    let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, ["acme_corp", "jack"]);
}

#[test]
fn interests_flatten_to_forest_entry_count() {
    let resp = sample_response();
    let users = resp.to_users().unwrap();
    let jack = users.iter().find(|u| u.id == "jack").unwrap();

    let forest = resp.user("jack").unwrap().interests.as_ref().unwrap();
    assert_eq!(jack.interests.len(), forest.len());
    assert_eq!(jack.interests[1].id, "11");
    assert_eq!(jack.interests[1].interest.display, "Startups");
}

#[test]
fn non_personal_account_has_no_interests() {
    let users = sample_response().to_users().unwrap();
    let corp = users.iter().find(|u| u.id == "acme_corp").unwrap();
    assert!(corp.interests.is_empty());
    assert!(corp.gender.is_none());
    assert!(!corp.account_type.as_ref().unwrap().personal);
}

#[test]
fn parents_are_resolved_by_id_and_dangling_ids_skipped() {
    let resp = sample_response();
    let forest = resp.user("jack").unwrap().interests.as_ref().unwrap();

    let parents: Vec<&str> = forest.parents_of("21").map(|(id, _)| id).collect();
    assert_eq!(parents, ["11", "20"]);
    assert_eq!(forest.parents_of("10").count(), 0);
    assert_eq!(forest.parents_of("missing").count(), 0);
}

#[test]
fn children_and_roots_follow_parent_references() {
    let resp = sample_response();
    let forest = resp.user("jack").unwrap().interests.as_ref().unwrap();

    let children: Vec<&str> = forest.children_of("11").map(|(id, _)| id).collect();
    assert_eq!(children, ["21"]);

    let roots: Vec<&str> = forest.roots().map(|(id, _)| id).collect();
    assert_eq!(roots, ["10", "20"]);
}

#[test]
fn macro_user_serializes_flattened_interest_fields() {
    let users = sample_response().to_users().unwrap();
    let jack = users.iter().find(|u| u.id == "jack").unwrap();
    let value = serde_json::to_value(jack).unwrap();

    assert_eq!(value["interests"][0]["id"], "10");
    assert_eq!(value["interests"][0]["display"], "Technology");
    assert_eq!(value["type"]["personal"], true);
    assert_eq!(value["gender"]["updated"], "1472083200");
}

#[test]
fn platform_updated_accepts_bare_integer() {
    let resp = sample_response();
    let platform = resp.user("jack").unwrap().platform.as_ref().unwrap();
    assert_eq!(platform.updated.unix_seconds(), 1_472_083_200);
    assert_eq!(platform.primary.as_ref().unwrap().name, "iPhone");
}

#[test]
fn null_scalars_decode_to_defaults() {
    let resp: UserResponse = serde_json::from_value(json!({
        "complete": true,
        "error": false,
        "message": null,
        "labels": {
            "jack": {
                "valid": null,
                "gender": { "confirmed": null, "label": null, "updated": "1472083200" },
                "location": {
                    "confirmed": false,
                    "updated": "1472083200",
                    "primary": {
                        "city": null,
                        "country": { "code": "US", "name": "United States" },
                        "display": null,
                        "granularity": "country",
                        "latitude": null,
                        "longitude": null,
                        "subdivision": null
                    }
                }
            }
        }
    }))
    .expect("nulls in scalar fields should decode");

    assert!(resp.error_message.is_empty());
    let jack = resp.user("jack").unwrap();
    assert!(!jack.valid);
    assert!(jack.gender.as_ref().unwrap().label.is_empty());

    let place = jack.location.as_ref().unwrap().primary.as_ref().unwrap();
    assert!(place.city.is_empty());
    assert!(place.display.is_empty());
    assert_eq!(place.granularity, "country");
    assert!(place.subdivision.is_none());
}

//! JSON boundary behavior: every request gets a well-formed payload back.

use cable_progress::handler::{handle_get, handle_post};
use cable_progress::store::memory::MemoryStore;
use serde_json::{Value, json};

fn write_all_body() -> String {
    json!({
        "action": "writeAll",
        "data": {
            "project": {
                "name": "Feeder 9",
                "startDate": "01/03/2025",
                "targetDate": "30/11/2025",
                "asOf": "Week 34",
                "types": [
                    { "name": "HV", "color": "#d32f2f" }
                ]
            },
            "boq": { "HV": { "total": 1000, "color": "#d32f2f" } },
            "srn": [
                { "type": "HV", "date": "05/01/2025", "length": 400, "ref": "SRN-7" },
                { "type": "HV", "date": "02/01/2025", "length": 100, "ref": "" }
            ],
            "manual": {
                "HV": { "delivered": null, "pulled": 300, "lastWeek": 0, "thisWeek": 300 }
            },
            "snapshots": []
        }
    })
    .to_string()
}

#[test]
fn write_then_read_cycle() {
    let mut store = MemoryStore::new();

    let response = handle_post(&mut store, &write_all_body());
    assert_eq!(response, json!({ "success": true }));

    let model = handle_get(&mut store, "read");
    assert_eq!(model["project"]["name"], "Feeder 9");
    assert_eq!(model["project"]["types"][0]["name"], "HV");
    assert_eq!(model["boq"]["HV"]["total"], 1000.0);
    assert_eq!(model["srn"][0]["type"], "HV");
    assert_eq!(model["srn"][0]["date"], "05/01/2025");
    assert_eq!(model["srn"][0]["ref"], "SRN-7");
    assert_eq!(
        model["manual"]["HV"]["delivered"],
        Value::Null,
        "auto stays auto through a full cycle"
    );
    assert_eq!(model["snapshots"], json!([]));
}

#[test]
fn write_partial_manual_only() {
    let mut store = MemoryStore::new();
    handle_post(&mut store, &write_all_body());

    let body = json!({
        "action": "writePartial",
        "sheetKey": "manual",
        "data": {
            "HV": { "delivered": 200, "pulled": 300, "lastWeek": 0, "thisWeek": 300 }
        }
    })
    .to_string();
    let response = handle_post(&mut store, &body);
    assert_eq!(response, json!({ "success": true }));

    let model = handle_get(&mut store, "read");
    assert_eq!(model["manual"]["HV"]["delivered"], 200.0);
    // other sections untouched
    assert_eq!(model["boq"]["HV"]["total"], 1000.0);
    assert_eq!(model["srn"].as_array().unwrap().len(), 2);
}

#[test]
fn read_on_an_empty_store_returns_defaults_not_errors() {
    let mut store = MemoryStore::new();
    let model = handle_get(&mut store, "read");
    assert!(model.get("error").is_none());
    assert_eq!(model["project"]["name"], "");
    assert_eq!(model["boq"], json!({}));
    assert_eq!(model["srn"], json!([]));
}

#[test]
fn unknown_get_action() {
    let mut store = MemoryStore::new();
    let response = handle_get(&mut store, "delete");
    assert_eq!(response, json!({ "error": "Unknown GET action: delete" }));
}

#[test]
fn missing_action_is_reported_as_unknown() {
    let mut store = MemoryStore::new();
    let response = handle_post(&mut store, r#"{"data": {}}"#);
    assert_eq!(response["error"], "Unknown POST action: ");
}

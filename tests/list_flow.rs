//! End-to-end flows through the public event API, with the plugin runtime
//! simulated by feeding `Action::Fetch` results back as `Event::WebResponse`.

use std::time::{Duration, Instant};

use userdeck::api::{ApiRequest, RequestKind};
use userdeck::{handle_event, initialize, Action, AppState, Config, Event, SortField, ViewMode};

fn users_json(ids: std::ops::RangeInclusive<i64>, total: usize) -> Vec<u8> {
    let users: Vec<serde_json::Value> = ids
        .map(|id| {
            serde_json::json!({
                "id": id,
                "firstName": format!("Name{id}"),
                "lastName": "Tester",
                "age": 20 + id,
                "email": format!("user{id}@example.test"),
            })
        })
        .collect();
    serde_json::json!({ "users": users, "total": total, "skip": 0, "limit": 15 })
        .to_string()
        .into_bytes()
}

fn fetches(actions: &[Action]) -> Vec<ApiRequest> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Fetch(req) => Some(req.clone()),
            _ => None,
        })
        .collect()
}

fn send(state: &mut AppState, event: Event, now: Instant) -> Vec<Action> {
    handle_event(state, &event, now).expect("events are handled").1
}

fn reply(state: &mut AppState, request: &ApiRequest, body: Vec<u8>, now: Instant) -> Vec<Action> {
    send(
        state,
        Event::WebResponse {
            tag: request.tag,
            status: 200,
            body,
        },
        now,
    )
}

#[test]
fn first_page_then_scroll_to_second_page() {
    let now = Instant::now();
    let mut state = initialize(&Config::default());

    let first = fetches(&send(&mut state, Event::Initialize, now));
    assert_eq!(first.len(), 1);
    assert_eq!(
        first[0].url,
        "https://dummyjson.com/users?limit=15&skip=0&sortBy=firstName&order=asc"
    );
    reply(&mut state, &first[0], users_json(1..=15, 42), now);
    assert_eq!(state.list.state().items.len(), 15);
    assert_eq!(state.list.state().total, 42);

    let mut second = vec![];
    for _ in 0..14 {
        second.extend(fetches(&send(&mut state, Event::KeyDown, now)));
    }
    assert_eq!(second.len(), 1);
    assert!(second[0].url.contains("skip=15"));

    reply(&mut state, &second[0], users_json(16..=30, 42), now);
    let list = state.list.state();
    assert_eq!(list.items.len(), 30);
    assert_eq!(list.current_page_index, 1);
    assert!(list.items.len() <= list.total);
}

#[test]
fn typing_burst_issues_single_search() {
    let start = Instant::now();
    let mut state = initialize(&Config::default());
    let initial = fetches(&send(&mut state, Event::Initialize, start));
    reply(&mut state, &initial[0], users_json(1..=15, 42), start);

    send(&mut state, Event::SearchMode, start);
    let mut issued = vec![];
    for (offset, c) in "anna".chars().enumerate() {
        let at = start + Duration::from_millis(60 * offset as u64);
        issued.extend(fetches(&send(&mut state, Event::Char(c), at)));
    }
    // Every wake-up scheduled by the burst arrives; only the last one is due.
    for ms in [300, 360, 420, 480] {
        issued.extend(fetches(&send(&mut state, Event::Tick, start + Duration::from_millis(ms))));
    }

    assert_eq!(issued.len(), 1);
    assert!(issued[0].url.contains("/users/search?"));
    assert!(issued[0].url.ends_with("q=anna"));
    assert!(state.list.state().items.is_empty());
    assert_eq!(state.list.state().search_query, "anna");
}

#[test]
fn sort_toggle_during_append_queues_fresh_reset() {
    let now = Instant::now();
    let mut state = initialize(&Config::default());
    let initial = fetches(&send(&mut state, Event::Initialize, now));
    reply(&mut state, &initial[0], users_json(1..=15, 42), now);

    let mut append = vec![];
    for _ in 0..14 {
        append.extend(fetches(&send(&mut state, Event::KeyDown, now)));
    }
    assert!(state.list.state().is_loading);

    let during = send(&mut state, Event::SortFieldChanged(SortField::LastName), now);
    assert!(fetches(&during).is_empty());
    assert_eq!(state.list.state().sort_field, SortField::LastName);

    let after = fetches(&reply(&mut state, &append[0], users_json(16..=30, 42), now));
    assert_eq!(after.len(), 1);
    assert!(after[0].url.contains("skip=0"));
    assert!(after[0].url.contains("sortBy=lastName"));
    // The stale append payload was not applied.
    assert!(state.list.state().items.is_empty());

    reply(&mut state, &after[0], users_json(100..=114, 42), now);
    assert_eq!(state.list.state().items[0].id, 100);
    assert!(!state.list.state().is_loading);
}

#[test]
fn malformed_body_surfaces_decode_error() {
    let now = Instant::now();
    let mut state = initialize(&Config::default());
    let initial = fetches(&send(&mut state, Event::Initialize, now));

    reply(&mut state, &initial[0], b"<!doctype html>".to_vec(), now);

    let list = state.list.state();
    assert!(!list.is_loading);
    assert!(list.items.is_empty());
    assert!(list.error.as_deref().is_some_and(|e| e.starts_with("Error decoding users")));

    let screen = userdeck::ui::render_to_string(&state, 24, 80);
    assert!(screen.contains("Error decoding users"));
}

#[test]
fn unanswered_request_times_out() {
    let start = Instant::now();
    let config = Config {
        request_timeout_secs: 3,
        ..Config::default()
    };
    let mut state = initialize(&config);
    let initial = send(&mut state, Event::Initialize, start);
    assert!(initial.contains(&Action::ScheduleWake(Duration::from_secs(3))));

    send(&mut state, Event::Tick, start + Duration::from_secs(3));
    assert!(!state.list.state().is_loading);
    assert_eq!(
        state.list.state().error.as_deref(),
        Some("Network error: request timed out after 3s")
    );

    // Reload works again afterwards.
    let reload = fetches(&send(&mut state, Event::Reload, start + Duration::from_secs(4)));
    assert_eq!(reload.len(), 1);
}

#[test]
fn detail_screen_renders_sections() {
    let now = Instant::now();
    let mut state = initialize(&Config::default());
    let initial = fetches(&send(&mut state, Event::Initialize, now));
    reply(&mut state, &initial[0], users_json(1..=2, 2), now);

    let detail = fetches(&send(&mut state, Event::Select, now));
    assert_eq!(detail[0].tag.kind, RequestKind::Detail);
    assert_eq!(detail[0].url, "https://dummyjson.com/users/1");
    assert_eq!(state.view_mode, ViewMode::Detail);

    let body = serde_json::json!({
        "id": 1, "firstName": "Emily", "lastName": "Johnson", "age": 28,
        "gender": "female", "email": "emily.johnson@x.dummyjson.com", "phone": "+81 965-431-3024",
        "company": {"name": "Dooley, Kozey and Cronin", "department": "Engineering", "title": "Sales Manager"},
        "address": {"address": "626 Main Street", "city": "Phoenix", "state": "Mississippi", "country": "United States"}
    });
    reply(&mut state, &detail[0], body.to_string().into_bytes(), now);

    let vm = state.compute_viewmodel(40, 100);
    let view = vm.detail.expect("detail view");
    let titles: Vec<&str> = view.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["Personal Information", "Work", "Address"]);
    assert_eq!(view.sections[0].rows[2].value, "Female");

    let screen = userdeck::ui::render_to_string(&state, 40, 100);
    assert!(screen.contains("Sales Manager"));

    send(&mut state, Event::Back, now);
    assert_eq!(state.view_mode, ViewMode::List);
}

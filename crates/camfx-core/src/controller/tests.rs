use super::*;
use crate::catalog::Catalog;
use crate::delivery::DeliveryClient;
use std::collections::VecDeque;
use std::path::PathBuf;

const VADER: &str = "my-camera-filters-assets:vader_helmet";

/// Camera that replays a scripted sequence of frames.
struct ScriptedCamera(VecDeque<Result<Snapshot, CaptureError>>);

impl ScriptedCamera {
    fn frames(n: usize) -> Self {
        Self(
            (0..n)
                .map(|i| Ok(Snapshot::from_image_bytes("image/jpeg", format!("frame{i}").as_bytes())))
                .collect(),
        )
    }

    fn not_ready() -> Self {
        Self(VecDeque::from([Err(CaptureError::NotReady)]))
    }
}

impl Camera for ScriptedCamera {
    fn snapshot(&mut self) -> Result<Snapshot, CaptureError> {
        self.0.pop_front().unwrap_or(Err(CaptureError::NotReady))
    }
}

fn client() -> DeliveryClient {
    DeliveryClient::new("demo", true).unwrap()
}

fn hosted_controller(public_id: &str) -> Controller {
    let mut c = Controller::new(Catalog::default());
    let ticket = c.capture(&mut ScriptedCamera::frames(1)).unwrap().unwrap();
    let outcome = c.complete_upload(ticket.generation, Ok(HostedImage::new(public_id)));
    assert!(matches!(outcome, UploadOutcome::Applied(_)));
    c
}

fn assert_cleared(c: &Controller) {
    assert!(c.snapshot().is_none());
    assert!(c.hosted().is_none());
    assert!(c.overlay().is_none());
    assert!(c.filter().is_none());
}

#[test]
fn live_capture_before_any_upload() {
    let mut c = Controller::new(Catalog::default());
    assert_eq!(c.display_url(&client()).unwrap(), None);
    assert_eq!(c.view(&client()).unwrap(), View::LiveCapture);

    c.capture(&mut ScriptedCamera::frames(1)).unwrap().unwrap();
    assert!(c.is_uploading());
    assert_eq!(c.view(&client()).unwrap(), View::LiveCapture);
}

#[test]
fn capture_before_camera_ready_is_noop() {
    let mut c = Controller::new(Catalog::default());
    let ticket = c.capture(&mut ScriptedCamera::not_ready()).unwrap();
    assert!(ticket.is_none());
    assert_eq!(c.generation(), 0);
    assert_cleared(&c);
    assert!(c.last_error().is_none());
}

#[test]
fn capture_io_error_leaves_state_unchanged() {
    let mut c = hosted_controller("abc123");
    let mut cam = ScriptedCamera(VecDeque::from([Err(CaptureError::Unsupported(
        PathBuf::from("x.gif"),
    ))]));
    assert!(c.capture(&mut cam).is_err());
    assert_eq!(c.hosted().unwrap().public_id, "abc123");
    assert_eq!(c.generation(), 1);
}

#[test]
fn hosted_image_without_transformations() {
    let c = hosted_controller("abc123");
    assert_eq!(
        c.view(&client()).unwrap(),
        View::Hosted {
            url: "https://res.cloudinary.com/demo/image/upload/abc123".into()
        }
    );
}

#[test]
fn overlay_and_filter_scenario() {
    let mut c = hosted_controller("abc123");
    c.select_overlay(VADER).unwrap();
    c.select_filter("hokusai").unwrap();
    let url = c.display_url(&client()).unwrap().unwrap();
    let overlay_at = url
        .find("l_my-camera-filters-assets:vader_helmet/fl_layer_apply,")
        .expect("overlay segment");
    let filter_at = url.find("e_art:hokusai").expect("filter segment");
    assert!(overlay_at < filter_at);
    assert!(url.ends_with("/abc123"));
}

#[test]
fn overlay_always_precedes_filter() {
    let mut c = hosted_controller("abc123");
    let filters = c.catalog().filters.clone();
    for (i, filter) in filters.iter().enumerate() {
        // Alternate selection order; composition order must not depend on it.
        if i % 2 == 0 {
            c.select_filter(filter).unwrap();
            c.select_overlay(VADER).unwrap();
        } else {
            c.select_overlay(VADER).unwrap();
            c.select_filter(filter).unwrap();
        }
        let url = c.display_url(&client()).unwrap().unwrap();
        let overlay_at = url.find("/l_").unwrap();
        let filter_at = url.find(&format!("e_art:{filter}")).unwrap();
        assert!(overlay_at < filter_at, "{url}");
        assert_eq!(url.matches("e_art:").count(), 1);
    }
}

#[test]
fn filter_only_and_cleared_selections() {
    let mut c = hosted_controller("abc123");
    c.select_filter("zorro").unwrap();
    assert_eq!(
        c.display_url(&client()).unwrap().unwrap(),
        "https://res.cloudinary.com/demo/image/upload/e_art:zorro/abc123"
    );
    c.clear_filter();
    c.select_overlay(VADER).unwrap();
    let url = c.display_url(&client()).unwrap().unwrap();
    assert!(!url.contains("e_art:"));
    c.clear_overlay();
    assert_eq!(
        c.display_url(&client()).unwrap().unwrap(),
        "https://res.cloudinary.com/demo/image/upload/abc123"
    );
}

#[test]
fn selection_requires_hosted_image() {
    let mut c = Controller::new(Catalog::default());
    assert_eq!(c.select_overlay(VADER), Err(SelectError::NoHostedImage));
    assert_eq!(c.select_filter("hokusai"), Err(SelectError::NoHostedImage));

    c.capture(&mut ScriptedCamera::frames(1)).unwrap();
    assert_eq!(c.select_filter("hokusai"), Err(SelectError::NoHostedImage));
}

#[test]
fn selection_rejects_unknown_names() {
    let mut c = hosted_controller("abc123");
    assert_eq!(
        c.select_overlay("unicorn_horn"),
        Err(SelectError::UnknownOverlay("unicorn_horn".into()))
    );
    assert_eq!(
        c.select_filter("vaporwave"),
        Err(SelectError::UnknownFilter("vaporwave".into()))
    );
    assert!(c.overlay().is_none());
    assert!(c.filter().is_none());
}

#[test]
fn reset_clears_everything() {
    let mut c = hosted_controller("abc123");
    c.select_overlay(VADER).unwrap();
    c.select_filter("frost").unwrap();
    c.reset();
    assert_cleared(&c);
    assert_eq!(c.view(&client()).unwrap(), View::LiveCapture);

    // Reset from a fresh controller is equally clean.
    let mut fresh = Controller::new(Catalog::default());
    fresh.reset();
    assert_cleared(&fresh);
}

#[test]
fn late_upload_after_reset_is_discarded() {
    let mut c = Controller::new(Catalog::default());
    let ticket = c.capture(&mut ScriptedCamera::frames(1)).unwrap().unwrap();
    c.reset();
    let outcome = c.complete_upload(ticket.generation, Ok(HostedImage::new("late")));
    assert_eq!(
        outcome,
        UploadOutcome::Stale {
            generation: 1,
            current: 2
        }
    );
    assert_cleared(&c);
    assert_eq!(c.view(&client()).unwrap(), View::LiveCapture);
}

#[test]
fn newest_capture_wins_regardless_of_arrival_order() {
    let mut c = Controller::new(Catalog::default());
    let mut cam = ScriptedCamera::frames(2);
    let first = c.capture(&mut cam).unwrap().unwrap();
    let second = c.capture(&mut cam).unwrap().unwrap();
    assert!(second.generation > first.generation);
    assert_ne!(first.snapshot, second.snapshot);

    let applied = c.complete_upload(second.generation, Ok(HostedImage::new("second")));
    assert!(matches!(applied, UploadOutcome::Applied(_)));
    let stale = c.complete_upload(first.generation, Ok(HostedImage::new("first")));
    assert!(matches!(stale, UploadOutcome::Stale { .. }));
    assert_eq!(c.hosted().unwrap().public_id, "second");
}

#[test]
fn new_capture_clears_previous_image_and_selections() {
    let mut c = hosted_controller("abc123");
    c.select_filter("linen").unwrap();
    c.capture(&mut ScriptedCamera::frames(1)).unwrap().unwrap();
    assert!(c.snapshot().is_some());
    assert!(c.hosted().is_none());
    assert!(c.filter().is_none());
    assert_eq!(c.view(&client()).unwrap(), View::LiveCapture);
}

#[test]
fn upload_failure_stays_live_and_allows_retry() {
    let mut c = Controller::new(Catalog::default());
    let ticket = c.capture(&mut ScriptedCamera::frames(1)).unwrap().unwrap();
    let outcome = c.complete_upload(
        ticket.generation,
        Err(UploadError::Http {
            status: 500,
            body: String::new(),
        }),
    );
    assert!(matches!(outcome, UploadOutcome::Failed(ref m) if m.contains("500")));
    assert!(c.last_error().unwrap().contains("HTTP 500"));
    assert!(!c.is_uploading());
    assert_eq!(c.view(&client()).unwrap(), View::LiveCapture);

    let retry = c.capture(&mut ScriptedCamera::frames(1)).unwrap().unwrap();
    assert!(c.last_error().is_none());
    c.complete_upload(retry.generation, Ok(HostedImage::new("ok")));
    assert!(matches!(c.view(&client()).unwrap(), View::Hosted { .. }));
}

#[test]
fn previews_empty_without_hosted_image() {
    let c = Controller::new(Catalog::default());
    assert!(c.overlay_previews(&client()).unwrap().is_empty());
    assert!(c.filter_previews(&client()).unwrap().is_empty());
}

#[test]
fn previews_cover_catalog_and_mark_active() {
    let mut c = hosted_controller("abc123");
    c.select_filter("hokusai").unwrap();

    let overlays = c.overlay_previews(&client()).unwrap();
    assert_eq!(overlays.len(), 1);
    assert!(!overlays[0].active);
    assert_eq!(
        overlays[0].url,
        "https://res.cloudinary.com/demo/image/upload/w_200,h_200/\
         l_my-camera-filters-assets:vader_helmet/\
         fl_layer_apply,fl_relative,g_faces,h_1.2,y_-0.05/abc123"
    );

    let filters = c.filter_previews(&client()).unwrap();
    assert_eq!(filters.len(), 21);
    let active: Vec<_> = filters.iter().filter(|p| p.active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "hokusai");
    assert!(filters
        .iter()
        .all(|p| p.url.contains("/w_200,h_200/e_art:") && !p.url.contains("fl_layer_apply")));
    assert!(filters
        .iter()
        .any(|p| p.name == "al_dente" && p.url.ends_with("/e_art:al_dente/abc123")));
}

#[test]
fn custom_catalog_drives_selection() {
    let catalog = Catalog::from_toml("overlays = [\"assets:hat\"]\nfilters = [\"sonnet\"]").unwrap();
    let mut c = Controller::new(catalog);
    let t = c.set_snapshot(Snapshot::from_image_bytes("image/png", b"x"));
    c.complete_upload(t.generation, Ok(HostedImage::new("p")));
    assert!(c.select_overlay("assets:hat").is_ok());
    assert!(c.select_overlay(VADER).is_err());
    assert!(c.select_filter("hokusai").is_err());
    assert!(c.select_filter("sonnet").is_ok());
}

#[test]
fn with_hosted_starts_in_hosted_mode() {
    let mut c = Controller::with_hosted(Catalog::default(), HostedImage::new("earlier"));
    assert!(c.snapshot().is_none());
    c.select_filter("audrey").unwrap();
    assert_eq!(
        c.display_url(&client()).unwrap().unwrap(),
        "https://res.cloudinary.com/demo/image/upload/e_art:audrey/earlier"
    );
    c.reset();
    assert_cleared(&c);
}

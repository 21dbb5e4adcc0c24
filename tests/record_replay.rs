//! Record-replay round-trip integration test.
//!
//! 1. Run a create/get/delete session against a recording context.
//! 2. Replay the cassettes with `ServiceContext::replaying_from()`.
//! 3. Assert the replayed session produces identical results.

use jokestore::cassette::config::CassetteConfig;
use jokestore::cassette::recorder::CassetteRecorder;
use jokestore::config::{Backend, Config};
use jokestore::context::ServiceContext;
use jokestore::{ErrorKind, RecordIndex};
use serde_json::json;

/// Runs the same scripted session on any index and returns its observations.
fn exercise(index: &RecordIndex) -> (String, String, ErrorKind, u64) {
    let id = index.create("knock knock").unwrap();
    let body = index.read_by_id(&id).unwrap();
    index.delete(&id).unwrap();
    let after = index.read_by_id(&id).unwrap_err().kind();
    let len = index.len().unwrap();
    (id, body, after, len)
}

fn memory_config() -> Config {
    Config { backend: Backend::Memory, seed_on_start: false, ..Config::default() }
}

#[test]
fn record_then_replay_produces_identical_outputs() {
    let root = tempfile::tempdir().unwrap();

    let (ctx, session) = ServiceContext::recording_at(memory_config(), root.path()).unwrap();
    let recorded = exercise(&ctx.index());
    drop(ctx);
    let dir = session.finish().unwrap();

    assert_eq!(recorded.1, "knock knock");
    assert_eq!(recorded.2, ErrorKind::NotFound);
    assert_eq!(recorded.3, 0);

    let config = CassetteConfig {
        store: Some(dir.join("store.cassette.yaml")),
        id_gen: Some(dir.join("id_gen.cassette.yaml")),
    };
    let first = exercise(&ServiceContext::replaying_from(&config, memory_config()).unwrap().index());
    let second = exercise(&ServiceContext::replaying_from(&config, memory_config()).unwrap().index());

    assert_eq!(first, recorded, "replay differs from recording");
    assert_eq!(second, first, "replay is not deterministic");
}

#[test]
fn replayed_collision_is_resampled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collision.cassette.yaml");

    let mut rec = CassetteRecorder::new(&path, "collision", "abc123");
    rec.record_draw("AAAAAAAA");
    rec.record_store_call("set_add", &json!({"member": "AAAAAAAA"}), &Ok::<_, String>(false));
    rec.record_draw("BBBBBBBB");
    rec.record_store_call("set_add", &json!({"member": "BBBBBBBB"}), &Ok::<_, String>(true));
    rec.record_store_call("put", &json!({"key": "rs1Jokes:BBBBBBBB"}), &Ok::<_, String>(()));
    rec.finish().unwrap();

    let ctx = ServiceContext::replaying(&path, memory_config()).unwrap();
    assert_eq!(ctx.index().create("second try").unwrap(), "BBBBBBBB");
}

#[test]
fn replayed_put_failure_rolls_back_reservation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("put_failure.cassette.yaml");

    let mut rec = CassetteRecorder::new(&path, "put-failure", "abc123");
    rec.record_draw("CCCCCCCC");
    rec.record_store_call("set_add", &(), &Ok::<_, String>(true));
    rec.record_store_call("put", &(), &Err::<(), _>("disk full"));
    rec.record_store_call("set_remove", &(), &Ok::<_, String>(true));
    rec.finish().unwrap();

    let ctx = ServiceContext::replaying(&path, memory_config()).unwrap();
    let err = ctx.index().create("doomed").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert!(err.to_string().contains("disk full"));
}

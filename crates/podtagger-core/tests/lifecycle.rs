mod common;

use std::{
    fs,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::{Duration, SystemTime},
};

use common::{Sandbox, frame_text, write_mp3, write_text};
use podtagger_core::{ConsoleReport, FileOutcome, ProcessError, tagging::TagOutcome};
use tempfile::tempdir;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    layer::{Context, Layer, SubscriberExt},
    registry,
};

/// Cuenta los eventos que llegarían a stderr con el filtro por defecto (`warn`).
#[derive(Clone, Default)]
struct LoudEvents(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for LoudEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() <= Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn good_file_is_tagged_and_original_kept() {
    let tmp = tempdir().unwrap();
    let sb = Sandbox::new(tmp.path());
    let input = sb.src("testAlbum/240229-test1.mp3");
    write_mp3(&input);

    let outcome = sb.tagger(false).process_file(&input).unwrap();

    assert_eq!(outcome, FileOutcome::Committed(TagOutcome::Saved));
    let out = sb.dest("testAlbum/240229-test1.mp3");
    assert!(out.is_file());
    assert!(input.is_file());
    assert!(!sb.dest("temp.mp3").exists());

    assert_eq!(frame_text(&out, "TALB").as_deref(), Some("testAlbum"));
    assert_eq!(frame_text(&out, "TCON").as_deref(), Some("Podcast"));
    assert_eq!(frame_text(&out, "TIT2").as_deref(), Some("240229-test1"));
    assert_eq!(frame_text(&out, "TDRC").as_deref(), Some("2024"));
    assert_eq!(frame_text(&out, "TDRL").as_deref(), Some("2024-02-29T00:00:00"));
    assert_eq!(frame_text(&out, "TOPE"), None);
}

#[test]
fn prefixed_name_with_remove_source_goes_to_backup() {
    let tmp = tempdir().unwrap();
    let sb = Sandbox::new(tmp.path());
    let input = sb.src("SCIENTIFIC_AMERICAN/pod_2024-01-30-test_file_1.mp3");
    write_mp3(&input);

    sb.tagger(true).process_file(&input).unwrap();

    assert!(!input.exists());
    assert!(sb.dest("SCIENTIFIC_AMERICAN/240130-test_file_1.mp3").is_file());
    assert!(sb.backup("SCIENTIFIC_AMERICAN/pod_2024-01-30-test_file_1.mp3").is_file());
}

#[test]
fn final_file_keeps_the_original_modification_time() {
    let tmp = tempdir().unwrap();
    let sb = Sandbox::new(tmp.path());
    let input = sb.src("news/240101-new year.mp3");
    write_mp3(&input);
    let old = SystemTime::UNIX_EPOCH + Duration::from_secs(1_704_067_200);
    fs::File::options().write(true).open(&input).unwrap().set_modified(old).unwrap();

    sb.tagger(false).process_file(&input).unwrap();

    let out = sb.dest("news/240101-new year.mp3");
    assert_eq!(fs::metadata(&out).unwrap().modified().unwrap(), old);
}

#[test]
fn already_correct_file_is_not_rewritten() {
    let tmp = tempdir().unwrap();
    let first = Sandbox::new(&tmp.path().join("first"));
    let input = first.src("testAlbum/240229-test1.mp3");
    write_mp3(&input);
    first.tagger(false).process_file(&input).unwrap();

    let second = Sandbox::new(&tmp.path().join("second"));
    let retagged = second.src("testAlbum/240229-test1.mp3");
    fs::create_dir_all(retagged.parent().unwrap()).unwrap();
    fs::copy(first.dest("testAlbum/240229-test1.mp3"), &retagged).unwrap();

    let outcome = second.tagger(false).process_file(&retagged).unwrap();

    assert_eq!(outcome, FileOutcome::Committed(TagOutcome::Unchanged));
    assert_eq!(
        fs::read(second.dest("testAlbum/240229-test1.mp3")).unwrap(),
        fs::read(&retagged).unwrap()
    );
}

#[test]
fn non_mp3_is_rejected() {
    let tmp = tempdir().unwrap();
    let sb = Sandbox::new(tmp.path());
    let input = sb.src("testAlbum/240229-bad.mp3");
    write_text(&input, "this is not audio");

    let err = sb.tagger(true).process_file(&input).unwrap_err();

    assert!(matches!(err, ProcessError::UnreadableAudio(ref p) if *p == input));
    assert!(!input.exists());
    assert!(sb.reject("testAlbum/pod_2024-02-29-bad.mp3").is_file());
    assert!(!sb.dest("testAlbum/240229-bad.mp3").exists());
    assert!(!sb.dest("temp.mp3").exists());
    assert!(!sb.dest("temp-recover.mp3").exists());
}

#[test]
fn impossible_date_is_rejected() {
    let tmp = tempdir().unwrap();
    let sb = Sandbox::new(tmp.path());
    let input = sb.src("testAlbum/240230-anything.mp3");
    write_mp3(&input);

    let err = sb.tagger(false).process_file(&input).unwrap_err();

    assert_eq!(err.to_string(), "Invalid release date: 240230");
    assert!(sb.reject("testAlbum/pod_2024-02-30-anything.mp3").is_file());
    assert!(!input.exists());
}

#[test]
fn unparsable_name_stays_in_place() {
    let tmp = tempdir().unwrap();
    let sb = Sandbox::new(tmp.path());
    let input = sb.src("testAlbum/episode 12.mp3");
    write_mp3(&input);

    let err = sb.tagger(true).process_file(&input).unwrap_err();

    assert!(matches!(err, ProcessError::InvalidFilenameFormat(_)));
    assert!(input.is_file());
    assert_eq!(fs::read_dir(&sb.config.reject_dir).unwrap().count(), 0);
}

#[test]
fn staging_slot_is_skipped() {
    let tmp = tempdir().unwrap();
    let sb = Sandbox::new(tmp.path());
    let input = sb.src("testAlbum/temp.mp3");
    write_mp3(&input);

    assert_eq!(sb.tagger(true).process_file(&input).unwrap(), FileOutcome::Skipped);
    assert!(input.is_file());
}

#[test]
fn whole_run_console_output() {
    let tmp = tempdir().unwrap();
    let sb = Sandbox::new(tmp.path());
    write_mp3(&sb.src("testAlbum/240229-test1.mp3"));
    write_mp3(&sb.src("testAlbum/240230-anything.mp3"));
    write_mp3(&sb.src("testAlbum/temp.mp3"));
    write_mp3(&sb.src("other/episode.mp3"));

    let mut console = ConsoleReport::new(Vec::new());
    let report = sb.tagger(false).run_source(&sb.config.source_dir, &mut console).unwrap();
    let printed = String::from_utf8(console.into_inner()).unwrap();

    assert_eq!(report.good, 1);
    assert_eq!(report.bad_count(), 2);

    let episode = sb.src("other/episode.mp3");
    let anything = sb.src("testAlbum/240230-anything.mp3");
    let parse_msg = format!("{} - invalid file-name format", episode.display());
    let expected = format!(
        "Processing file other/episode.mp3\n    ({parse_msg})\n\
         Processing file testAlbum/240229-test1.mp3 - OK\n\
         Processing file testAlbum/240230-anything.mp3\n    moved to reject ??????????\n    (Invalid release date: 240230)\n\
         Ignoring temporary file testAlbum/temp.mp3\n\
         Processed 1 good files 2 bad files.\n\
         Bad files:\n    {} ({parse_msg})\n    {} (Invalid release date: 240230)\n\
         End of run ++++++++++\n",
        episode.display(),
        anything.display(),
    );
    assert_eq!(printed, expected);
}

#[test]
fn empty_source_says_so() {
    let tmp = tempdir().unwrap();
    let sb = Sandbox::new(tmp.path());

    let mut console = ConsoleReport::new(Vec::new());
    let report = sb.tagger(false).run_source(&sb.config.source_dir, &mut console).unwrap();

    assert_eq!(report.good, 0);
    assert_eq!(
        String::from_utf8(console.into_inner()).unwrap(),
        format!("No files found in {}\n", sb.config.source_dir.display())
    );
}

#[test]
fn rejecting_a_file_stays_off_stderr() {
    let tmp = tempdir().unwrap();
    let sb = Sandbox::new(tmp.path());
    let broken = sb.src("testAlbum/240229-bad.mp3");
    let bad_date = sb.src("testAlbum/240230-anything.mp3");
    write_text(&broken, "this is not audio");
    write_mp3(&bad_date);

    let loud = LoudEvents::default();
    let subscriber = registry().with(loud.clone());
    tracing::subscriber::with_default(subscriber, || {
        let tagger = sb.tagger(false);
        assert!(tagger.process_file(&broken).is_err());
        assert!(tagger.process_file(&bad_date).is_err());
    });

    assert!(sb.reject("testAlbum/pod_2024-02-29-bad.mp3").is_file());
    assert_eq!(loud.0.load(Ordering::SeqCst), 0);
}

//! Integration tests for the organize flow.
//!
//! These tests exercise the public API end to end:
//! - Dated placement under `YYYY/MM/DD`
//! - Duplicate detection across runs
//! - Name disambiguation for different content
//! - Skipping files without a capture timestamp
//! - Hidden and linked files in the source tree

use assert_fs::prelude::*;
use assert_fs::TempDir;
use media_sorter::core::metadata::fixture::ExifJpeg;
use media_sorter::core::metadata::Absence;
use media_sorter::core::organize::CopyExecutor;
use media_sorter::core::resolver::Unavailable;
use media_sorter::core::{Organizer, PathResolver, ResolutionOutcome};
use predicates::prelude::*;

fn photo(taken: &str, payload: &[u8]) -> Vec<u8> {
    ExifJpeg::new()
        .make("Canon")
        .date_time_original(taken)
        .payload(payload)
        .build()
}

#[test]
fn resolves_into_day_bucket_with_original_name() {
    let temp = TempDir::new().unwrap();
    let source = temp.child("card/IMG_0001.JPG");
    source
        .write_binary(&photo("2021:06:15 10:30:00", b"first"))
        .unwrap();
    let out = temp.child("out");

    let outcome = PathResolver::new().resolve(source.path(), out.path()).unwrap();

    assert_eq!(
        outcome,
        ResolutionOutcome::Resolved(out.path().join("2021/06/15/IMG_0001.JPG"))
    );
    out.assert(predicate::path::missing());
}

#[test]
fn copying_then_resolving_again_yields_duplicate() {
    let temp = TempDir::new().unwrap();
    let source = temp.child("card/IMG_0001.JPG");
    source
        .write_binary(&photo("2021:06:15 10:30:00", b"first"))
        .unwrap();
    let out = temp.child("out");
    let resolver = PathResolver::new();

    let destination = match resolver.resolve(source.path(), out.path()).unwrap() {
        ResolutionOutcome::Resolved(destination) => destination,
        other => panic!("unexpected outcome {:?}", other),
    };
    CopyExecutor::copy(source.path(), &destination).unwrap();

    assert_eq!(
        resolver.resolve(source.path(), out.path()).unwrap(),
        ResolutionOutcome::Duplicate(destination)
    );
}

#[test]
fn different_content_under_same_name_gets_suffix() {
    let temp = TempDir::new().unwrap();
    let out = temp.child("out");
    out.child("2021/06/15/IMG_0001.JPG")
        .write_binary(&photo("2021:06:15 10:30:00", b"first"))
        .unwrap();
    let other = temp.child("card/IMG_0001.JPG");
    other
        .write_binary(&photo("2021:06:15 17:45:00", b"second"))
        .unwrap();

    let outcome = PathResolver::new().resolve(other.path(), out.path()).unwrap();

    assert_eq!(
        outcome,
        ResolutionOutcome::Resolved(out.path().join("2021/06/15/IMG_0001-1.JPG"))
    );
}

#[test]
fn unrecognised_file_is_unavailable() {
    let temp = TempDir::new().unwrap();
    let source = temp.child("card/clip.mov");
    source.write_str("not an image").unwrap();

    let outcome = PathResolver::new()
        .resolve(source.path(), temp.child("out").path())
        .unwrap();

    assert!(matches!(
        outcome,
        ResolutionOutcome::TimestampUnavailable(Unavailable::Absent(Absence::Undecodable(_)))
    ));
}

#[test]
fn jpeg_without_exif_has_no_metadata() {
    let temp = TempDir::new().unwrap();
    let source = temp.child("card/plain.jpg");
    source
        .write_binary(&[0xFF, 0xD8, 0xFF, 0xFE, 0x00, 0x04, b'h', b'i', 0xFF, 0xD9])
        .unwrap();

    let outcome = PathResolver::new()
        .resolve(source.path(), temp.child("out").path())
        .unwrap();

    assert_eq!(
        outcome,
        ResolutionOutcome::TimestampUnavailable(Unavailable::Absent(Absence::NoMetadata))
    );
}

#[test]
fn organizer_run_sorts_a_card() {
    let temp = TempDir::new().unwrap();
    let card = temp.child("card");
    card.child("DCIM/100CANON/IMG_0001.JPG")
        .write_binary(&photo("2021:06:15 10:30:00", b"one"))
        .unwrap();
    card.child("DCIM/100CANON/IMG_0002.JPG")
        .write_binary(&photo("2021:06:16 09:00:00", b"two"))
        .unwrap();
    card.child("DCIM/101CANON/IMG_0001.JPG")
        .write_binary(&photo("2021:06:15 12:00:00", b"three"))
        .unwrap();
    card.child("MISC/readme.txt").write_str("hello").unwrap();
    card.child(".Trashes/IMG_0009.JPG")
        .write_binary(&photo("2021:06:15 10:30:00", b"trash"))
        .unwrap();
    let out = temp.child("out");

    let summary = Organizer::builder()
        .source(card.path())
        .destination(out.path())
        .skip_hidden(true)
        .build()
        .unwrap()
        .run();

    assert_eq!(summary.files_seen, 4);
    assert_eq!(summary.copied, 3);
    assert_eq!(summary.timestamp_unavailable, 1);
    assert_eq!(summary.errors, 0);

    out.child("2021/06/15/IMG_0001.JPG")
        .assert(predicate::path::eq_file(
            card.child("DCIM/100CANON/IMG_0001.JPG").path(),
        ));
    out.child("2021/06/15/IMG_0001-1.JPG")
        .assert(predicate::path::eq_file(
            card.child("DCIM/101CANON/IMG_0001.JPG").path(),
        ));
    out.child("2021/06/16/IMG_0002.JPG")
        .assert(predicate::path::is_file());
    out.child("2021/06/15/IMG_0009.JPG")
        .assert(predicate::path::missing());
    card.child("DCIM/100CANON/IMG_0001.JPG")
        .assert(predicate::path::exists());
}

#[test]
fn organizer_second_run_copies_nothing() {
    let temp = TempDir::new().unwrap();
    let card = temp.child("card");
    card.child("IMG_0001.JPG")
        .write_binary(&photo("2021:06:15 10:30:00", b"one"))
        .unwrap();
    card.child("IMG_0002.JPG")
        .write_binary(&photo("2021:06:15 10:31:00", b"two"))
        .unwrap();
    let out = temp.child("out");
    let organizer = Organizer::builder()
        .source(card.path())
        .destination(out.path())
        .build()
        .unwrap();

    organizer.run();
    let second = organizer.run();

    assert_eq!(second.copied, 0);
    assert_eq!(second.duplicates, 2);
    out.child("2021/06/15/IMG_0001-1.JPG")
        .assert(predicate::path::missing());
}

#[test]
fn datetime_is_used_when_original_is_absent() {
    let temp = TempDir::new().unwrap();
    let source = temp.child("scan.jpg");
    source
        .write_binary(&ExifJpeg::new().date_time("1999:12:31 23:59:59").build())
        .unwrap();

    let outcome = PathResolver::new()
        .resolve(source.path(), temp.child("out").path())
        .unwrap();

    assert_eq!(
        outcome,
        ResolutionOutcome::Resolved(temp.child("out").path().join("1999/12/31/scan.jpg"))
    );
}

#[test]
fn hidden_files_are_sorted_by_default() {
    let temp = TempDir::new().unwrap();
    let card = temp.child("card");
    card.child(".IMG_HIDDEN.JPG")
        .write_binary(&photo("2021:06:15 10:30:00", b"hidden"))
        .unwrap();
    let out = temp.child("out");

    let summary = Organizer::builder()
        .source(card.path())
        .destination(out.path())
        .build()
        .unwrap()
        .run();

    assert_eq!(summary.files_seen, 1);
    assert_eq!(summary.copied, 1);
    out.child("2021/06/15/.IMG_HIDDEN.JPG")
        .assert(predicate::path::is_file());
}

#[cfg(unix)]
#[test]
fn linked_files_are_sorted_and_dangling_links_counted() {
    let temp = TempDir::new().unwrap();
    let elsewhere = temp.child("elsewhere/IMG_REAL.JPG");
    elsewhere
        .write_binary(&photo("2021:06:15 10:30:00", b"linked"))
        .unwrap();
    let card = temp.child("card");
    card.create_dir_all().unwrap();
    std::os::unix::fs::symlink(elsewhere.path(), card.child("IMG_LINKED.JPG").path()).unwrap();
    std::os::unix::fs::symlink(
        temp.child("elsewhere/missing.JPG").path(),
        card.child("IMG_GONE.JPG").path(),
    )
    .unwrap();
    let out = temp.child("out");

    let summary = Organizer::builder()
        .source(card.path())
        .destination(out.path())
        .build()
        .unwrap()
        .run();

    assert_eq!(summary.files_seen, 1);
    assert_eq!(summary.copied, 1);
    assert_eq!(summary.errors, 1);
    out.child("2021/06/15/IMG_LINKED.JPG")
        .assert(predicate::path::eq_file(elsewhere.path()));
}

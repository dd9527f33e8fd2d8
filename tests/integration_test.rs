//! Integration tests for qgd
//!
//! These tests build real compound documents on disk and run them through
//! the full pipeline from container to CSV.

use qgd::container::{
    QgdContainer, MS_RAW_DATA_STREAM, RAW_DATA_STORAGE, RETENTION_TIME_STREAM,
    SPECTRUM_INDEX_STREAM, TIC_DATA_STREAM,
};
use qgd::decode::ScanError;
use qgd::error::QgdError;
use qgd::export::{default_output_path, resolve_collision, write_output_file};
use qgd::session::{decode_file, DecodeRequest, DecodedOutput, QgdReader};
use qgd::table::{Ms1Table, OutputKind, TableShape};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Build one scan block with a header declaring `width` bytes per intensity.
fn scan_block(scan: i32, rt_ms: i32, width: u16, peaks: &[(u16, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&scan.to_le_bytes());
    out.extend_from_slice(&rt_ms.to_le_bytes());
    out.extend_from_slice(&[0u8; 12]);
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&(peaks.len() as u16).to_le_bytes());
    out.extend_from_slice(&[0u8; 8]);
    for (mz_raw, intensity) in peaks {
        out.extend_from_slice(&mz_raw.to_le_bytes());
        out.extend_from_slice(intensity);
    }
    out
}

fn stream_path(segments: &[&str]) -> PathBuf {
    let mut path = PathBuf::from("/");
    path.extend(segments);
    path
}

/// Write a compound document holding the given streams.
fn write_qgd(path: &Path, streams: &[(&[&str], Vec<u8>)]) {
    let mut comp = cfb::create(path).unwrap();
    comp.create_storage(stream_path(&[RAW_DATA_STORAGE])).unwrap();
    for (segments, data) in streams {
        let mut stream = comp.create_stream(stream_path(segments)).unwrap();
        stream.write_all(data).unwrap();
    }
    comp.flush().unwrap();
}

fn i32_stream(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn i64_stream(values: &[i64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn u32_stream(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// A healthy run: two TIC points and two scans of two peaks each.
fn write_sample(path: &Path) {
    let blocks = [
        scan_block(1, 0, 2, &[(1001, &[3, 0]), (1020, &[4, 0])]),
        scan_block(2, 1000, 2, &[(1024, &[5, 0]), (1040, &[6, 0])]),
    ];
    let mut raw = Vec::new();
    let mut offsets = Vec::new();
    for b in &blocks {
        offsets.push(raw.len() as u32);
        raw.extend_from_slice(b);
    }

    write_qgd(
        path,
        &[
            (&RETENTION_TIME_STREAM, i32_stream(&[0, 1000])),
            (&TIC_DATA_STREAM, i64_stream(&[10, 20])),
            (&SPECTRUM_INDEX_STREAM, u32_stream(&offsets)),
            (&MS_RAW_DATA_STREAM, raw),
        ],
    );
}

#[test]
fn test_decode_tic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.qgd");
    write_sample(&path);

    let request = DecodeRequest::new(OutputKind::Tic, TableShape::Wide);
    let outcome = decode_file(&path, &request).unwrap();

    assert_eq!(outcome.outputs.len(), 1);
    match outcome.output(OutputKind::Tic) {
        Some(DecodedOutput::Tic(rows)) => {
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].rt_ms, 0);
            assert_eq!(rows[0].intensity, 10);
            assert_eq!(rows[1].rt_min, 0.01667);
            assert_eq!(rows[1].intensity, 20);
        }
        other => panic!("expected TIC output, got {:?}", other),
    }
    // MS data untouched when only TIC is requested
    assert!(!outcome.scans_read);
    assert_eq!(outcome.scans_total, 0);
}

#[test]
fn test_decode_ms1_long() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.qgd");
    write_sample(&path);

    let request = DecodeRequest::new(OutputKind::Ms1, TableShape::Long);
    let outcome = decode_file(&path, &request).unwrap();

    assert!(outcome.scans_read);
    assert_eq!(outcome.scans_total, 2);
    assert_eq!(outcome.scans_decoded, 2);
    assert_eq!(outcome.peak_count, 4);
    assert!(outcome.failures.is_empty());

    match outcome.output(OutputKind::Ms1) {
        Some(DecodedOutput::Ms1(Ms1Table::Long(rows))) => {
            assert_eq!(rows.len(), 4);
            assert_eq!(rows[0].scan, 1);
            assert_eq!(rows[0].mz, 50.05);
            assert_eq!(rows[0].intensity, 3);
            assert_eq!(rows[3].scan, 2);
            assert_eq!(rows[3].rt_ms, 1000);
            assert_eq!(rows[3].mz, 52.0);
        }
        other => panic!("expected long MS1 output, got {:?}", other),
    }
}

#[test]
fn test_decode_ms1_wide() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.qgd");
    write_sample(&path);

    let outcome = decode_file(&path, &DecodeRequest::default()).unwrap();
    match outcome.output(OutputKind::Ms1) {
        Some(DecodedOutput::Ms1(Ms1Table::Wide(table))) => {
            // 50.05 -> 50, 51.0 -> 51, 51.2 -> 51, 52.0 -> 52
            assert_eq!(table.bins, vec![50, 51, 52]);
            assert_eq!(table.rows.len(), 2);
            assert_eq!(table.rows[0].total_intensity, 7);
            assert_eq!(table.rows[1].total_intensity, 11);
            assert_eq!(table.cell(1000, 51), Some(5));
            assert_eq!(table.cell(0, 52), Some(0));
        }
        other => panic!("expected wide MS1 output, got {:?}", other),
    }
}

#[test]
fn test_decode_both_outputs_in_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.qgd");
    write_sample(&path);

    let outcome = decode_file(&path, &DecodeRequest::all(TableShape::Long)).unwrap();
    let kinds: Vec<_> = outcome.outputs.iter().map(|o| o.kind()).collect();
    assert_eq!(kinds, vec![OutputKind::Tic, OutputKind::Ms1]);
}

#[test]
fn test_missing_stream_names_the_stream() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no_tic.qgd");
    write_qgd(&path, &[(&RETENTION_TIME_STREAM, i32_stream(&[0]))]);

    let request = DecodeRequest::new(OutputKind::Tic, TableShape::Wide);
    match decode_file(&path, &request) {
        Err(QgdError::StreamNotFound(name)) => assert!(name.contains("TIC Data")),
        other => panic!("expected StreamNotFound, got {:?}", other),
    }
}

#[test]
fn test_not_a_container() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bogus.qgd");
    fs::write(&path, b"definitely not a compound document").unwrap();

    let result = decode_file(&path, &DecodeRequest::default());
    assert!(matches!(result, Err(QgdError::ContainerOpen { .. })));
}

#[test]
fn test_tic_length_mismatch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mismatch.qgd");
    write_qgd(
        &path,
        &[
            (&RETENTION_TIME_STREAM, i32_stream(&[0, 1000, 2000])),
            (&TIC_DATA_STREAM, i64_stream(&[1, 2])),
        ],
    );

    let request = DecodeRequest::new(OutputKind::Tic, TableShape::Wide);
    assert!(matches!(
        decode_file(&path, &request),
        Err(QgdError::SeriesLengthMismatch {
            retention_times: 3,
            intensities: 2
        })
    ));
}

#[test]
fn test_damaged_scan_is_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("damaged.qgd");

    let good_a = scan_block(1, 0, 2, &[(1000, &[1, 0])]);
    // Declares 2-byte intensities but carries 4-byte values
    let corrected = scan_block(2, 500, 2, &[(1000, &[2, 0, 0, 0]), (1020, &[3, 0, 0, 0])]);
    // Declares three peaks but the next block starts after 5 data bytes
    let mut broken = scan_block(3, 1000, 2, &[(1000, &[9, 0])]);
    broken[22] = 3;
    broken.push(0);
    let good_b = scan_block(4, 1500, 1, &[(1000, &[4])]);

    let mut raw = Vec::new();
    let mut offsets = Vec::new();
    for b in [&good_a, &corrected, &broken, &good_b] {
        offsets.push(raw.len() as u32);
        raw.extend_from_slice(b);
    }
    write_qgd(
        &path,
        &[
            (&SPECTRUM_INDEX_STREAM, u32_stream(&offsets)),
            (&MS_RAW_DATA_STREAM, raw),
        ],
    );

    let request = DecodeRequest::new(OutputKind::Ms1, TableShape::Long);
    let outcome = decode_file(&path, &request).unwrap();

    assert_eq!(outcome.scans_total, 4);
    assert_eq!(outcome.scans_decoded, 3);
    assert_eq!(outcome.corrections.len(), 1);
    assert_eq!(outcome.corrections[0].scan, 2);
    assert_eq!(outcome.corrections[0].correction.resolved, 4);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].index, 2);
    assert!(matches!(
        outcome.failures[0].error,
        ScanError::UnresolvableBlockSize { scan: 3, .. }
    ));

    match outcome.output(OutputKind::Ms1) {
        Some(DecodedOutput::Ms1(Ms1Table::Long(rows))) => {
            let scans: Vec<i32> = rows.iter().map(|r| r.scan).collect();
            assert_eq!(scans, vec![1, 2, 2, 4]);
            assert_eq!(rows[2].intensity, 3);
        }
        other => panic!("expected long MS1 output, got {:?}", other),
    }
}

#[test]
fn test_reader_exposes_streams() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.qgd");
    write_sample(&path);

    let mut reader = QgdReader::open(&path).unwrap();
    assert_eq!(reader.retention_times().unwrap(), vec![0, 1000]);
    assert_eq!(reader.tic_intensities().unwrap(), vec![10, 20]);
    assert_eq!(reader.spectrum_index().unwrap().len(), 2);
    assert_eq!(reader.container().streams().len(), 4);

    let aggregate = reader.read_scans(false).unwrap();
    assert!(aggregate.is_complete());
    assert_eq!(aggregate.rows.len(), 4);
}

#[test]
fn test_container_from_reader() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.qgd");
    write_sample(&path);

    let bytes = fs::read(&path).unwrap();
    let container = QgdContainer::from_reader(std::io::Cursor::new(bytes)).unwrap();
    let mut reader = QgdReader::new(container);
    assert_eq!(reader.read_tic().unwrap().len(), 2);
}

#[test]
fn test_export_to_csv() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("run.qgd");
    write_sample(&input);
    let out_dir = dir.path().join("output");
    fs::create_dir_all(&out_dir).unwrap();

    let outcome = decode_file(&input, &DecodeRequest::all(TableShape::Wide)).unwrap();
    let mut written = Vec::new();
    for output in &outcome.outputs {
        let target = default_output_path(&out_dir, &input, Some(output.kind()));
        let target = resolve_collision(&target, false, "20260101_120000");
        write_output_file(&target, output).unwrap();
        written.push(target);
    }

    assert_eq!(written[0], out_dir.join("run_tic.csv"));
    assert_eq!(written[1], out_dir.join("run_ms1.csv"));

    let tic = fs::read_to_string(&written[0]).unwrap();
    assert_eq!(
        tic,
        "rt / ms,rt / min,intensity\n0,0.0,10\n1000,0.01667,20\n"
    );

    let ms1 = fs::read_to_string(&written[1]).unwrap();
    let header = ms1.lines().next().unwrap();
    assert_eq!(header, "rt / min,rt / ms,total_intensity,50,51,52");
    assert_eq!(ms1.lines().count(), 3);

    // Second export of the same file must not clobber the first
    let again = resolve_collision(&written[0], false, "20260101_120000");
    assert_eq!(again, out_dir.join("run_tic_20260101_120000.csv"));
}

// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::path::Path;

use gcode_post::ast::*;
use gcode_post::files::{output_path, read_content, transform_file, write_lines, FileError};
use gcode_post::machine::{Machine, Options};
use gcode_post::{ErrKind, GeometryError};

const EXAMPLE: &str = "G90\nG1 X10.00 Y10.00 Z0.00 F100\nG2 X20.00 Y10.00 Z0.00 F100 R5.00\n";

#[test]
fn test_process() {
    let output = Machine::Snapmaker.process("example.nc", EXAMPLE, &Options::default()).unwrap();
    let lines = output.program.render();
    assert_eq!(lines.len(), 1 + 1 + 99);
    assert_eq!(lines[0], "G90");
    assert_eq!(lines[1], "G1 X10.00 Y10.00 Z0.00 F100");
    assert_eq!(lines[100], "G1 X20.00 Y10.00 Z0.00 F100");
    for line in &lines[1..] {
        assert!(line.starts_with("G1 X"), "{}", line);
        assert!(line.contains(" Z0.00 "), "{}", line);
        assert!(line.ends_with(" F100"), "{}", line);
    }

    match output.program.lines[2].command.instr {
        Instr::LinearMove(mv) => assert_eq!(mv.start, Coords { x: 10., y: 10., z: 0. }),
        ref other => panic!("unexpected {:?}", other),
    }
    match output.program.lines[100].command.instr {
        Instr::LinearMove(mv) => assert_eq!(mv.target, Coords { x: 20., y: 10., z: 0. }),
        ref other => panic!("unexpected {:?}", other),
    }

    let stats = &output.stats;
    assert_eq!(stats.total_lines(), 3);
    assert_eq!(stats.inputs[&CommandKind::ArcMove], 1);
    assert_eq!(stats.transformed.len(), 1);
    assert_eq!(stats.transformed[&CommandKind::ArcMove][&CommandKind::LinearMove], 99);
    assert!(stats.unidentified.is_empty());
}

#[test]
fn test_radius_too_small() {
    let input = EXAMPLE.replace("R5.00", "R1.00");
    let err = Machine::Snapmaker.process("example.nc", &input, &Options::default()).unwrap_err();
    assert_eq!(err.lineno, 3);
    assert!(matches!(err.kind, ErrKind::Geometry(GeometryError::TooFarApart { .. })));
}

#[test]
fn test_passthrough_and_stats() {
    let input = "(job start)\nG21\nM3 P255\nT2\n\nG0 X1 Y1\nM5\nM30\n";
    let options = Options { num_points: 10 };
    let output = Machine::Snapmaker.process("job.nc", input, &options).unwrap();
    assert_eq!(output.program.to_string(),
               "(job start)\nG21\nM3 P255\nT2\n\nG0 X1.00 Y1.00 Z0.00\nM5\nM30\n");
    assert_eq!(output.stats.unidentified, vec![4, 8]);
    assert!(output.stats.transformed.is_empty());
    assert_eq!(output.stats.inputs[&CommandKind::Empty], 1);
}

#[test]
fn test_runs_are_isolated() {
    let first = "G1 X50 Y50 Z5 F900\n";
    let second = "G2 X10 Y0 R5\n";
    let options = Options::default();
    Machine::Snapmaker.process("first.nc", first, &options).unwrap();
    let out = Machine::Snapmaker.process("second.nc", second, &options).unwrap();
    match out.program.lines[0].command.instr {
        Instr::LinearMove(mv) => {
            assert_eq!(mv.start, Coords { x: 0., y: 0., z: 0. });
            assert_eq!(mv.feed, 0.);
        }
        ref other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_output_path() {
    assert_eq!(output_path(Path::new("/jobs/part.nc")), Path::new("/jobs/part-transformed.nc"));
    assert_eq!(output_path(Path::new("part")), Path::new("part-transformed"));
    assert_eq!(output_path(Path::new("a/b.c.gcode")), Path::new("a/b.c-transformed.gcode"));
}

#[test]
fn test_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("part.nc");
    std::fs::write(&path, EXAMPLE).unwrap();

    let input = read_content(&path).unwrap();
    let output = Machine::Snapmaker.process("part.nc", &input, &Options { num_points: 3 }).unwrap();
    let target = output_path(&path);
    write_lines(&target, &output.program.render()).unwrap();

    let written = std::fs::read_to_string(&target).unwrap();
    assert_eq!(written.lines().count(), 4);
    assert!(written.starts_with("G90\nG1 X10.00 Y10.00 Z0.00 F100\n"));
    assert!(written.ends_with("G1 X20.00 Y10.00 Z0.00 F100\n"));
    // the semicircle's apex, rounded
    assert!(written.contains("G1 X15.00 Y15.00 Z0.00 F100\n"));
}

#[test]
fn test_failed_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("part.nc");
    std::fs::write(&path, EXAMPLE.replace("R5.00", "R1.00")).unwrap();
    let target = output_path(&path);

    let err = transform_file(Machine::Snapmaker, &path, &target, &Options::default()).unwrap_err();
    match err {
        FileError::Process(err) => assert_eq!(err.lineno, 3),
        other => panic!("unexpected {:?}", other),
    }
    assert!(!target.exists());
    // no leftover temporary files either
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

    // an existing output is left as it was
    std::fs::write(&target, "old\n").unwrap();
    assert!(transform_file(Machine::Snapmaker, &path, &target, &Options::default()).is_err());
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "old\n");

    // a missing input is reported as such
    let missing = dir.path().join("missing.nc");
    let err = transform_file(Machine::Snapmaker, &missing, &target, &Options::default());
    assert!(matches!(err, Err(FileError::Read { .. })));
}

#[test]
fn test_transform_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("part.nc");
    std::fs::write(&path, EXAMPLE).unwrap();
    let target = output_path(&path);
    std::fs::write(&target, "stale\n").unwrap();

    let output = transform_file(Machine::Snapmaker, &path, &target, &Options::default()).unwrap();
    let written = std::fs::read_to_string(&target).unwrap();
    assert_eq!(written.lines().collect::<Vec<_>>(), output.program.render());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

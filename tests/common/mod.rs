#![allow(dead_code)]

use index_workloads::{Error, GeneratorSettings, Phase, Result, TraceGenerator};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Raw generator output for a three-key load phase
pub const RAW_LOAD: &str = "\
YCSB Client 0.1
Command line: -db site.ycsb.BasicDB -P workload_spec/workloada -s -load
INSERT usertable user100 [ field0=aaaa field1=bbbb ]
INSERT usertable user200 [ field0=cccc field1=dddd ]
INSERT usertable user300 [ field0=eeee field1=ffff ]
[OVERALL], RunTime(ms), 4
[INSERT], Operations, 3
";

/// Raw generator output for a run phase over [`RAW_LOAD`]
pub const RAW_RUN: &str = "\
YCSB Client 0.1
Command line: -db site.ycsb.BasicDB -P workload_spec/workloada -s -t
READ usertable user200 [ <all fields>]
INSERT usertable user400 [ field0=gggg ]
UPDATE usertable user400 [ field1=hhhh ]
SCAN usertable user100 10 [ <all fields>]
[OVERALL], RunTime(ms), 2
";

/// Stands in for the YCSB launcher by writing canned output
pub struct FakeGenerator {
    load: String,
    run: String,
    fail_on: Option<Phase>,
    pub calls: RefCell<Vec<(Phase, PathBuf)>>,
}

impl FakeGenerator {
    pub fn new(load: &str, run: &str) -> Self {
        Self {
            load: load.to_string(),
            run: run.to_string(),
            fail_on: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn standard() -> Self {
        Self::new(RAW_LOAD, RAW_RUN)
    }

    pub fn failing_on(mut self, phase: Phase) -> Self {
        self.fail_on = Some(phase);
        self
    }
}

impl TraceGenerator for FakeGenerator {
    fn generate(&self, phase: Phase, spec: &Path, output: &Path) -> Result<()> {
        self.calls.borrow_mut().push((phase, spec.to_path_buf()));
        let body = match phase {
            Phase::Load => &self.load,
            Phase::Run => &self.run,
        };
        // Mimic a generator that dies partway through its output
        fs::write(output, body).map_err(|e| Error::file(output, e))?;
        if self.fail_on == Some(phase) {
            return Err(Error::Generator {
                phase: phase.to_string(),
                detail: "exited with status 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Scratch area with an output directory and helpers for input files
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temporary directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.path().join("workloads")
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write input file");
        path
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("Failed to read output file")
    }

    pub fn settings(&self) -> GeneratorSettings {
        GeneratorSettings::default()
            .with_output_dir(self.output_dir())
            .with_spec_dir(self.dir.path().join("workload_spec"))
            .with_corpus(self.dir.path().join("list.txt"))
    }

    /// File names left in the output directory, sorted
    pub fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(self.output_dir()) {
            Ok(entries) => entries
                .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }
}

/// `n` synthetic addresses, `u<i>@host<i>.example.org`
pub fn email_corpus(n: usize) -> String {
    (0..n)
        .map(|i| format!("u{}@host{}.example.org", i, i))
        .collect::<Vec<_>>()
        .join("\n")
}

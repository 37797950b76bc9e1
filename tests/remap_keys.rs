mod common;

use common::Workspace;
use index_workloads::{Error, RemapJob, RemapMode, RemapReport};

fn rewrite_job(ws: &Workspace, load: &str, txn: &str, corpus: &str) -> RemapJob {
    RemapJob::new(
        RemapMode::Rewrite {
            load: ws.write("load.txt", load),
            txn: ws.write("txn.txt", txn),
        },
        ws.write("corpus.txt", corpus),
        ws.path().join("out.txt"),
    )
}

#[test]
fn test_rewrite_transaction_trace() {
    let ws = Workspace::new();
    let job = rewrite_job(
        &ws,
        "INSERT user3\nINSERT user7\n",
        "READ user7\nSCAN user3 5\n",
        "a@b.com\nc@d.com\n",
    );

    let report = job.run().unwrap();
    assert!(matches!(report, RemapReport::Rewritten(stats) if stats.substituted == 2));
    assert_eq!(ws.read(&job.output), "READ c@d.com\nSCAN a@b.com 5");
}

#[test]
fn test_rewrite_from_positional_args() {
    let ws = Workspace::new();
    let load = ws.write("load.txt", "INSERT k1\nINSERT k2\nINSERT k3\n");
    let txn = ws.write("txn.txt", "UPDATE k3\nINSERT k9\nREAD k1\n");
    let corpus = ws.write("corpus.txt", "x@y.org\n");
    let output = ws.path().join("out.txt");

    let job = RemapJob::from_args(
        load.to_str().unwrap(),
        txn.to_str().unwrap(),
        corpus.to_str().unwrap(),
        output.to_str().unwrap(),
    )
    .unwrap();
    match job.run().unwrap() {
        RemapReport::Rewritten(stats) => {
            assert_eq!(stats.lines, 3);
            assert_eq!(stats.inserts, 1);
            // k3 has ordinal 2, past the single corpus entry
            assert_eq!(stats.wrapped, 1);
        }
        other => panic!("unexpected report {:?}", other),
    }
    assert_eq!(ws.read(&output), "UPDATE x@y.org\nINSERT k9\nREAD x@y.org");
}

#[test]
fn test_convert_corpus_only() {
    let ws = Workspace::new();
    let corpus = ws.write("corpus.txt", "b@x.org\na@y.net\nc@z.com\n");
    let output = ws.path().join("load_email.txt");

    let job = RemapJob::from_args("none", "none", corpus.to_str().unwrap(), output.to_str().unwrap())
        .unwrap();
    assert_eq!(job.run().unwrap(), RemapReport::Converted { entries: 3 });
    assert_eq!(
        ws.read(&output),
        "INSERT b@x.org\nINSERT a@y.net\nINSERT c@z.com"
    );
}

#[test]
fn test_unknown_key_cites_line() {
    let ws = Workspace::new();
    let job = rewrite_job(&ws, "INSERT user1\n", "UPDATE user3\n", "a@b.com\n");

    let err = job.run().unwrap_err();
    assert_eq!(err.to_string(), "Key user3 @ 0 does not exist");
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn test_malformed_load_line() {
    let ws = Workspace::new();
    let job = rewrite_job(&ws, "INSERT user1\nREAD user2\n", "READ user1\n", "a@b.com\n");

    let err = job.run().unwrap_err();
    assert!(matches!(err, Error::MalformedLine { line: 1, .. }));
    assert!(err.to_string().starts_with("Illegal line @ 1"));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_update_in_load_trace_cites_line_zero() {
    let ws = Workspace::new();
    let job = rewrite_job(&ws, "UPDATE user3\nINSERT user7\n", "READ user7\n", "a@b.com\n");

    let err = job.run().unwrap_err();
    assert!(matches!(err, Error::MalformedLine { line: 0, .. }));
}

#[test]
fn test_half_none_is_a_usage_error() {
    let err = RemapJob::from_args("none", "txn.txt", "corpus.txt", "out.txt").unwrap_err();
    assert!(matches!(err, Error::Usage(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_missing_corpus_is_a_usage_error() {
    let ws = Workspace::new();
    let job = RemapJob::new(
        RemapMode::Rewrite {
            load: ws.write("load.txt", "INSERT a\n"),
            txn: ws.write("txn.txt", "READ a\n"),
        },
        ws.path().join("no-such-corpus"),
        ws.path().join("out.txt"),
    );

    let err = job.run().unwrap_err();
    assert!(err.to_string().starts_with("Illegal corpus file"));
    assert!(!ws.path().join("out.txt").exists());
}

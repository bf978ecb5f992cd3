//! End-to-end test of the export pipeline: crawler CSV fixtures in, seed
//! list and statistics report out.

use std::fs;
use std::path::{Path, PathBuf};

use seed_exporter::config::Config;
use seed_exporter::exporter::Exporter;

const HEADER: &str = "network,address,port,reachable,connection_time,services,version,user_agent\n";

fn write_crawler_file(dir: &Path, name: &str, rows: &[&str]) {
    let mut contents = String::from(HEADER);
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    fs::write(dir.join(name), contents).unwrap();
}

fn config(crawler_dir: &Path, result_dir: &Path) -> Config {
    Config::new(
        crawler_dir.to_path_buf(),
        result_dir.to_path_buf(),
        false,
        None,
        21,
        None,
        None,
        PathBuf::from("public_html/seeds.txt"),
    )
    .unwrap()
}

fn result_file(result_dir: &Path, prefix: &str) -> PathBuf {
    let mut matches: Vec<PathBuf> = fs::read_dir(result_dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(prefix))
        })
        .collect();
    assert_eq!(matches.len(), 1, "expected exactly one {prefix}* file");
    matches.pop().unwrap()
}

#[test]
fn test_full_export_run() {
    let crawler_dir = tempfile::tempdir().unwrap();
    let result_dir = tempfile::tempdir().unwrap();

    write_crawler_file(
        crawler_dir.path(),
        "2026-08-27T06-00-01Z_reachable_nodes.csv",
        &[
            // accepted, one per network type, deliberately out of order
            "i2p,udhdrtrcetjm5sxzskjyr5ztpeszydbh4dpl3pl4utgqqw2v4jna.b32.i2p,0,true,12.5,1,70016,/Satoshi:27.0.0/",
            "onion_v3,pg6mmjiyjmcrsslvykfwnntlaru7p5svn6y2ymmju6nubxndf4pscryd.onion,8333,true,20.0,1,70016,/Satoshi:27.0.0/",
            "ipv6,2001:db8::1,8333,true,1.25,9,70016,/Satoshi:27.1.0/",
            "cjdns,fc32:17ea:e415:c3bf:9808:149d:b5a2:c9aa,8333,true,2.5,1,70016,",
            "ipv4,203.0.113.5,8333,true,0.25,1,70016,/Satoshi:27.0.0/",
            // rejected: one per reason
            "ipv4,203.0.113.6,8333,false,,1,70016,/Satoshi:27.0.0/",
            "ipv4,203.0.113.7,8334,true,0.25,1,70016,/Satoshi:27.0.0/",
            "ipv4,203.0.113.8,8333,true,2.6,1,70016,/Satoshi:27.0.0/",
        ],
    );

    let conf = config(crawler_dir.path(), result_dir.path());
    Exporter::new(conf).run().unwrap();

    let seeds = fs::read_to_string(result_file(result_dir.path(), "seeds-")).unwrap();
    let expected = "\
203.0.113.5 8333 0.250 00000001 70016
2001:db8::1 8333 1.250 00000009 70016
fc32:17ea:e415:c3bf:9808:149d:b5a2:c9aa 8333 2.500 00000001 70016
pg6mmjiyjmcrsslvykfwnntlaru7p5svn6y2ymmju6nubxndf4pscryd.onion 8333 20.000 00000001 70016
udhdrtrcetjm5sxzskjyr5ztpeszydbh4dpl3pl4utgqqw2v4jna.b32.i2p 0 12.500 00000001 70016
";
    assert_eq!(seeds, expected);
    assert!(seeds.ends_with('\n'));

    let stats: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(result_file(result_dir.path(), "stats-")).unwrap())
            .unwrap();
    assert_eq!(stats["overall"]["total"], 8);
    assert_eq!(stats["overall"]["accepted"], 5);
    assert_eq!(stats["networks"]["ipv4"]["total"], 4);
    assert_eq!(stats["networks"]["ipv4"]["accepted"], 1);
    assert_eq!(stats["networks"]["ipv4"]["unreachable"], 1);
    assert_eq!(stats["networks"]["ipv4"]["non_standard_port"], 1);
    assert_eq!(stats["networks"]["ipv4"]["connection_too_slow"], 1);
}

#[test]
fn test_run_with_no_accepted_nodes_writes_empty_seed_list() {
    let crawler_dir = tempfile::tempdir().unwrap();
    let result_dir = tempfile::tempdir().unwrap();

    write_crawler_file(
        crawler_dir.path(),
        "2026-08-27T06-00-01Z_reachable_nodes.csv",
        &["ipv4,203.0.113.6,8333,false,,1,70016,/Satoshi:27.0.0/"],
    );

    let conf = config(crawler_dir.path(), result_dir.path());
    Exporter::new(conf).run().unwrap();

    let seeds = fs::read(result_file(result_dir.path(), "seeds-")).unwrap();
    assert!(seeds.is_empty());
}

#[test]
fn test_malformed_record_aborts_without_writing_outputs() {
    let crawler_dir = tempfile::tempdir().unwrap();
    let result_dir = tempfile::tempdir().unwrap();

    write_crawler_file(
        crawler_dir.path(),
        "2026-08-27T06-00-01Z_reachable_nodes.csv",
        &[
            "ipv4,203.0.113.5,8333,true,0.25,1,70016,/Satoshi:27.0.0/",
            // reachable but no connection time
            "ipv4,203.0.113.6,8333,true,,1,70016,/Satoshi:27.0.0/",
        ],
    );

    let conf = config(crawler_dir.path(), result_dir.path());
    let err = Exporter::new(conf).run().unwrap_err();
    assert!(err.to_string().contains("malformed record"));

    // nothing was published
    assert_eq!(fs::read_dir(result_dir.path()).unwrap().count(), 0);
}

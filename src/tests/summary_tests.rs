// src/tests/summary_tests.rs

//! tests for `summary.rs`

use std::time::Duration;

use crate::common::{AllocatorChosen, FPath};
use crate::matchers::macaddress::MacAddress;
use crate::merge::mergedriver::{MergeConfig, MergeSummary};
use crate::printer::summary::write_summary;

fn summary() -> MergeSummary {
    MergeSummary {
        files_given: 3,
        files_opened: 3,
        files_no_timestamp: 1,
        files_gz: 1,
        records_read: 7,
        records_emitted: 5,
        bytes_written: 123,
        identifiers: 2,
        records_malformed: 1,
    }
}

fn write_to_string(config: &MergeConfig, output: Option<&FPath>) -> String {
    let mut buffer: Vec<u8> = Vec::new();
    write_summary(
        &mut buffer,
        &summary(),
        config,
        output,
        Duration::from_millis(1500),
        AllocatorChosen::System,
    )
    .unwrap();

    String::from_utf8(buffer).unwrap()
}

#[test]
fn test_write_summary() {
    let config = MergeConfig::new(vec![FPath::from("a"), FPath::from("b"), FPath::from("c")]);
    let text = write_to_string(&config, None);
    assert!(text.contains("Files given            : 3\n"), "{}", text);
    assert!(text.contains("Records printed        : 5\n"), "{}", text);
    assert!(text.contains("Printed bytes          : 123\n"), "{}", text);
    assert!(text.contains("Output                 : STDOUT\n"), "{}", text);
    assert!(text.contains("Program run time       : 1.500 seconds\n"), "{}", text);
    assert!(!text.contains("Identifiers"), "{}", text);
}

#[test]
fn test_write_summary_filter() {
    let mut config = MergeConfig::new(vec![FPath::from("a")]);
    config.mac_filter = Some(MacAddress::parse("a:b:c:d:e:f").unwrap());
    let output = FPath::from("/tmp/out.log");
    let text = write_to_string(&config, Some(&output));
    assert!(text.contains("Filter MAC address     : 0a:0b:0c:0d:0e:0f\n"), "{}", text);
    assert!(text.contains("Identifiers collected  : 2\n"), "{}", text);
    assert!(text.contains("Records malformed      : 1\n"), "{}", text);
    assert!(text.contains("Output                 : \"/tmp/out.log\"\n"), "{}", text);
}

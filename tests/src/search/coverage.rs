use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;

use ipmd5_common::network::range::Ipv4Range;
use ipmd5_core::enumerate::AddressesExt;
use ipmd5_core::partition::Partitioner;
use ipmd5_core::pool::{JobEvent, WorkerPool};
use ipmd5_core::search::Search;
use ipmd5_core::sink::LineSink;
use ipmd5_core::targets::TargetSet;

/// Reduced space: a /12 split into 256 /20 jobs over 5 workers.
#[test]
fn union_of_worker_output_is_the_whole_space() {
    let space: Ipv4Range = "100.64.0.0/12".parse().unwrap();
    let jobs: Vec<Ipv4Range> = Partitioner::new(20).split(space).collect();
    assert_eq!(jobs.len(), 256);

    let report = WorkerPool::new(5)
        .run(
            jobs,
            |worker, range, tx| {
                let first = range.base();
                let count = range.addresses().count() as u64;
                let last = range.addresses().last();
                tx.send((worker, *range, first, last, count))?;
                Ok(count)
            },
            |rx| Ok(rx.iter().collect::<Vec<_>>()),
            None,
        )
        .unwrap();

    assert_eq!(report.units, space.len());

    let mut per_job = report.sink;
    per_job.sort_by_key(|(_, range, ..)| range.base());

    let mut expected_next = u64::from(u32::from(space.base()));
    for (_, range, first, last, count) in &per_job {
        assert_eq!(u64::from(u32::from(*first)), expected_next, "gap or overlap at {range}");
        assert_eq!(*last, Some(range.broadcast()));
        assert_eq!(*count, range.len());
        expected_next += count;
    }
    assert_eq!(expected_next, u64::from(u32::from(space.broadcast())) + 1);
}

#[test]
fn every_job_is_reported_once() {
    let targets: TargetSet = std::iter::empty::<&str>().collect();
    let jobs: Vec<Ipv4Range> = Partitioner::new(24).split("10.20.0.0/18".parse().unwrap()).collect();

    let seen: Mutex<HashMap<usize, u64>> = Mutex::new(HashMap::new());
    let observe = |event: JobEvent| {
        if let JobEvent::Finished { worker, units } = event {
            *seen.lock().unwrap().entry(worker).or_default() += units;
        }
    };

    let mut sink = LineSink::new(Vec::new());
    let report = Search::new(&targets, WorkerPool::new(4))
        .run(jobs, &mut sink, Some(&observe))
        .unwrap();

    assert_eq!(report.jobs_completed, 64);
    let seen = seen.into_inner().unwrap();
    assert!(seen.keys().all(|worker| (1..=4).contains(worker)));
    assert_eq!(seen.values().sum::<u64>(), 1 << 14);
    assert_eq!(report.addresses_scanned, 1 << 14);
}

#[test]
fn top_level_partition_skips_0_and_255() {
    let jobs: Vec<Ipv4Range> = Partitioner::new(8).jobs(&[]).collect();
    let firsts: Vec<u8> = jobs.iter().map(|r| r.base().octets()[0]).collect();

    assert_eq!(firsts, (1..=254).rev().collect::<Vec<u8>>());
    assert!(!jobs.iter().any(|r| r.contains(Ipv4Addr::UNSPECIFIED)));
    assert!(!jobs.iter().any(|r| r.contains(Ipv4Addr::BROADCAST)));
}

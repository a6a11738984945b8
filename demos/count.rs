use std::io::BufRead;

use anyhow::Context;
use ctrack::{Counter, CounterConfig, Error, Frame, FrameQueue};

const QUEUE_CAPACITY: usize = 64;

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (flags, args): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|a| a.starts_with("--"));
    let dump_tracks = flags.iter().any(|f| f == "--tracks");

    let mut args = args.into_iter();
    let in_file_name = args.next().context("expected detections file name")?;
    let stride = match args.next() {
        Some(s) => s.parse().context("stride must be a positive integer")?,
        None => 1,
    };

    let dets_file = std::fs::File::open(&in_file_name)
        .with_context(|| format!("failed to open {}", in_file_name))?;

    let mut counter = Counter::new(CounterConfig::new(stride))?;
    let mut queue = FrameQueue::with_capacity(QUEUE_CAPACITY)?;

    for (lineno, line) in std::io::BufReader::new(dets_file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let frame = match Frame::from_json_line(&line) {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("line {}: {}", lineno + 1, err);
                continue;
            }
        };

        loop {
            match queue.push(frame.clone()) {
                Ok(()) => break,
                Err(Error::QueueFull { .. }) => {
                    let skipped = if queue.is_empty() {
                        let skipped = frame.index - queue.next_index();
                        queue.skip_to(frame.index);
                        skipped
                    } else {
                        queue.skip_gap()
                    };

                    log::warn!("frame {}: {} frames never arrived", frame.index, skipped);

                    while let Some(frame) = queue.pop() {
                        track(&mut counter, &frame, dump_tracks);
                    }
                }
                Err(err) => {
                    log::warn!("line {}: {}", lineno + 1, err);
                    break;
                }
            }
        }

        while let Some(frame) = queue.pop() {
            track(&mut counter, &frame, dump_tracks);
        }
    }

    if !queue.is_empty() {
        log::warn!("{} frames left behind a gap at {}", queue.len(), queue.next_index());
    }

    println!("total: {}", counter.total());

    Ok(())
}

fn track(counter: &mut Counter, frame: &Frame, dump_tracks: bool) {
    match counter.update(frame) {
        Ok(Some(_)) if dump_tracks => match serde_json::to_string(&counter.tracks()) {
            Ok(tracks) => println!("{}:{}", frame.index, tracks),
            Err(err) => log::warn!("frame {}: {}", frame.index, err),
        },
        Ok(Some(_)) => println!("{} {} {}", frame.index, counter.total(), counter.current()),
        Ok(None) => {}
        Err(err) => log::warn!("frame {} skipped: {}", frame.index, err),
    }
}

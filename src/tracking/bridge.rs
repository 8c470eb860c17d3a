//! External hand-detector process.
//!
//! The detector owns the camera and the landmark model. It prints `READY`
//! once initialised, then streams packets on stdout: one JSON header line
//! followed by `frame_len` bytes of JPEG.

use super::landmarks::{HandLandmarks, LANDMARK_COUNT, Landmark};
use super::source::{HandSource, TrackedFrame, TrackingError};
use crate::config::TrackerConfig;
use serde::Deserialize;
use std::io::{BufRead, BufReader, ErrorKind};
use std::process::{Child, ChildStdout, Command, Stdio};

#[derive(Debug, Deserialize)]
struct PacketHeader {
    width: u32,
    height: u32,
    #[serde(default)]
    frame_len: usize,
    #[serde(default)]
    hands: Vec<HandPacket>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HandPacket {
    #[serde(default)]
    handedness: String,
    #[serde(default)]
    score: f32,
    landmarks: Vec<LandmarkPacket>,
}

#[derive(Debug, Deserialize)]
struct LandmarkPacket {
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
}

impl HandPacket {
    fn into_landmarks(self) -> Option<HandLandmarks> {
        if self.landmarks.len() != LANDMARK_COUNT {
            return None;
        }
        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (slot, lm) in landmarks.iter_mut().zip(self.landmarks) {
            *slot = Landmark::new(lm.x, lm.y, lm.z);
        }
        Some(HandLandmarks {
            landmarks,
            score: self.score,
            handedness: self.handedness,
        })
    }
}

/// Command-line flags passed to the detector after the configured args.
pub fn bridge_args(config: &TrackerConfig) -> Vec<String> {
    let mut args = config.args.clone();
    args.extend([
        "--camera".to_string(),
        config.camera_index.to_string(),
        "--width".to_string(),
        config.frame_width.to_string(),
        "--height".to_string(),
        config.frame_height.to_string(),
        "--max-hands".to_string(),
        config.max_hands.to_string(),
        "--min-detection-confidence".to_string(),
        config.min_detection_confidence.to_string(),
        "--min-tracking-confidence".to_string(),
        config.min_tracking_confidence.to_string(),
    ]);
    if config.mirror {
        args.push("--mirror".to_string());
    }
    args
}

/// Block until the detector prints its `READY` line.
pub fn wait_ready<R: BufRead>(reader: &mut R) -> Result<(), TrackingError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(TrackingError::Disconnected);
    }
    if line.trim() != "READY" {
        return Err(TrackingError::NotReady(line.trim().to_string()));
    }
    Ok(())
}

/// Largest JPEG payload accepted from the detector.
pub const MAX_FRAME_LEN: usize = 64 * 1024 * 1024;

/// Read one packet.
///
/// Returns `Ok(None)` for blank lines and for packets the detector flagged
/// with an error; the frame bytes are still consumed so the stream stays
/// aligned. Lines that are not a packet header (stray prints, or the tail of
/// a frame after a bad header) are skipped until a header turns up again.
pub fn read_packet<R: BufRead>(
    reader: &mut R,
    min_detection_confidence: f32,
) -> Result<Option<TrackedFrame>, TrackingError> {
    let Some(header) = read_header(reader)? else {
        return Ok(None);
    };

    if header.frame_len > MAX_FRAME_LEN {
        return Err(TrackingError::Protocol(format!(
            "frame_len {} exceeds {} bytes",
            header.frame_len, MAX_FRAME_LEN
        )));
    }

    let mut jpeg = vec![0u8; header.frame_len];
    reader.read_exact(&mut jpeg).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => TrackingError::Disconnected,
        _ => TrackingError::Io(e),
    })?;

    if let Some(error) = header.error {
        log::warn!("Hand tracker skipped a frame: {}", error);
        return Ok(None);
    }

    let image = if jpeg.is_empty() {
        None
    } else {
        let image =
            image::load_from_memory_with_format(&jpeg, image::ImageFormat::Jpeg)?.to_rgb8();
        if image.dimensions() != (header.width, header.height) {
            log::warn!(
                "Camera frame is {}x{} but the packet says {}x{}",
                image.width(),
                image.height(),
                header.width,
                header.height
            );
        }
        Some(image)
    };

    let hand = header
        .hands
        .into_iter()
        .filter(|hand| hand.score >= min_detection_confidence)
        .filter_map(HandPacket::into_landmarks)
        .max_by(|a, b| a.score.total_cmp(&b.score));

    log::trace!(
        "Packet {}x{}, {} bytes, hand: {}",
        header.width,
        header.height,
        header.frame_len,
        hand.is_some()
    );

    Ok(Some(TrackedFrame::from_hand(
        header.width,
        header.height,
        image,
        hand,
    )))
}

/// Read lines until one ends in a packet header.
///
/// `Ok(None)` is a blank line with nothing skipped before it.
fn read_header<R: BufRead>(reader: &mut R) -> Result<Option<PacketHeader>, TrackingError> {
    let mut line = Vec::new();
    let mut skipped = 0usize;
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Err(TrackingError::Disconnected);
        }
        let trimmed = line.trim_ascii();
        if trimmed.is_empty() {
            if skipped == 0 {
                return Ok(None);
            }
            continue;
        }

        if let Some((offset, header)) = find_header(trimmed) {
            if skipped + offset > 0 {
                log::warn!(
                    "Skipped {} bytes of tracker output before the next packet",
                    skipped + offset
                );
            }
            return Ok(Some(header));
        }

        skipped += line.len();
        if skipped > MAX_FRAME_LEN {
            return Err(TrackingError::Protocol(format!(
                "no packet header in {} bytes",
                skipped
            )));
        }
    }
}

/// Find the first `{` from which the rest of the line parses as a header.
fn find_header(line: &[u8]) -> Option<(usize, PacketHeader)> {
    line.iter()
        .enumerate()
        .filter(|(_, byte)| **byte == b'{')
        .find_map(|(offset, _)| {
            serde_json::from_slice(&line[offset..])
                .ok()
                .map(|header| (offset, header))
        })
}

/// Hand source backed by the external detector process.
pub struct BridgeSource {
    process: Child,
    reader: BufReader<ChildStdout>,
    min_detection_confidence: f32,
    name: String,
}

impl BridgeSource {
    /// Launch the detector and wait for it to become ready.
    pub fn spawn(config: &TrackerConfig) -> Result<Self, TrackingError> {
        let args = bridge_args(config);
        log::info!("Starting hand tracker: {} {}", config.command, args.join(" "));

        let mut process = Command::new(&config.command)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| TrackingError::Spawn {
                command: config.command.clone(),
                source,
            })?;

        let Some(stdout) = process.stdout.take() else {
            let _ = process.kill();
            return Err(TrackingError::Disconnected);
        };
        let mut reader = BufReader::new(stdout);

        if let Err(err) = wait_ready(&mut reader) {
            let _ = process.kill();
            let _ = process.wait();
            return Err(err);
        }
        log::info!("Hand tracker ready (camera {})", config.camera_index);

        Ok(Self {
            process,
            reader,
            min_detection_confidence: config.min_detection_confidence,
            name: format!("bridge:{}", config.command),
        })
    }
}

impl HandSource for BridgeSource {
    fn next_frame(&mut self) -> Result<Option<TrackedFrame>, TrackingError> {
        read_packet(&mut self.reader, self.min_detection_confidence)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for BridgeSource {
    fn drop(&mut self) {
        log::debug!("Stopping hand tracker process");
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::encode_jpeg;
    use image::RgbImage;
    use std::io::Cursor;

    fn hand_json(score: f32, tip: (f32, f32), count: usize) -> String {
        let landmarks: Vec<String> = (0..count)
            .map(|i| {
                let (x, y) = if i == 8 { tip } else { (0.1, 0.1) };
                format!(r#"{{"x":{x},"y":{y},"z":0.0}}"#)
            })
            .collect();
        format!(
            r#"{{"handedness":"Right","score":{score},"landmarks":[{}]}}"#,
            landmarks.join(",")
        )
    }

    fn packet(hands: &[String], jpeg: &[u8], error: Option<&str>) -> Vec<u8> {
        let error = error
            .map(|e| format!(r#","error":"{e}""#))
            .unwrap_or_default();
        let mut bytes = format!(
            r#"{{"width":640,"height":480,"frame_len":{},"hands":[{}]{}}}"#,
            jpeg.len(),
            hands.join(","),
            error
        )
        .into_bytes();
        bytes.push(b'\n');
        bytes.extend_from_slice(jpeg);
        bytes
    }

    #[test]
    fn ready_line_is_required() {
        assert!(wait_ready(&mut Cursor::new(b"READY\n".to_vec())).is_ok());
        assert!(matches!(
            wait_ready(&mut Cursor::new(b"Traceback\n".to_vec())),
            Err(TrackingError::NotReady(line)) if line == "Traceback"
        ));
        assert!(matches!(
            wait_ready(&mut Cursor::new(Vec::new())),
            Err(TrackingError::Disconnected)
        ));
    }

    #[test]
    fn packet_with_hand_and_image() {
        let jpeg = encode_jpeg(&RgbImage::new(32, 24), 80).unwrap();
        let bytes = packet(&[hand_json(0.9, (0.25, 0.75), 21)], &jpeg, None);
        let mut reader = Cursor::new(bytes);

        let frame = read_packet(&mut reader, 0.7).unwrap().unwrap();
        assert_eq!((frame.width, frame.height), (640, 480));
        assert_eq!(frame.image.as_ref().map(|i| i.dimensions()), Some((32, 24)));
        let tip = frame.fingertip.unwrap();
        assert_eq!((tip.x, tip.y), (0.25, 0.75));
        assert_eq!(frame.hand.unwrap().handedness, "Right");

        assert!(matches!(
            read_packet(&mut reader, 0.7),
            Err(TrackingError::Disconnected)
        ));
    }

    #[test]
    fn weak_or_incomplete_hands_are_ignored() {
        let hands = [hand_json(0.3, (0.5, 0.5), 21), hand_json(0.95, (0.5, 0.5), 5)];
        let mut reader = Cursor::new(packet(&hands, &[], None));

        let frame = read_packet(&mut reader, 0.7).unwrap().unwrap();
        assert!(frame.image.is_none());
        assert!(frame.hand.is_none());
        assert!(frame.fingertip.is_none());
    }

    #[test]
    fn best_scoring_hand_wins() {
        let hands = [hand_json(0.8, (0.1, 0.2), 21), hand_json(0.99, (0.6, 0.4), 21)];
        let mut reader = Cursor::new(packet(&hands, &[], None));

        let tip = read_packet(&mut reader, 0.7).unwrap().unwrap().fingertip.unwrap();
        assert_eq!((tip.x, tip.y), (0.6, 0.4));
    }

    #[test]
    fn error_packet_is_skipped_and_stream_stays_aligned() {
        let mut bytes = packet(&[], b"junk", Some("camera read failed"));
        bytes.extend(packet(&[hand_json(0.9, (0.5, 0.5), 21)], &[], None));
        let mut reader = Cursor::new(bytes);

        assert!(read_packet(&mut reader, 0.7).unwrap().is_none());
        assert!(read_packet(&mut reader, 0.7).unwrap().unwrap().fingertip.is_some());
    }

    #[test]
    fn malformed_header_and_truncated_frame() {
        let mut reader = Cursor::new(b"{not json}\n".to_vec());
        assert!(matches!(
            read_packet(&mut reader, 0.7),
            Err(TrackingError::Disconnected)
        ));

        let mut truncated = packet(&[], &[1, 2, 3, 4], None);
        truncated.truncate(truncated.len() - 2);
        assert!(matches!(
            read_packet(&mut Cursor::new(truncated), 0.7),
            Err(TrackingError::Disconnected)
        ));
    }

    #[test]
    fn stream_recovers_after_a_garbled_header() {
        let jpeg = encode_jpeg(&RgbImage::new(64, 48), 80).unwrap();
        let mut bytes = b"debug: camera warming up\n".to_vec();
        // A header the parser cannot read, so its frame bytes run into the next header
        bytes.extend_from_slice(b"{\"width\":640,\"height\":\n");
        bytes.extend_from_slice(&jpeg);
        for _ in 0..5 {
            bytes.extend(packet(&[hand_json(0.9, (0.5, 0.5), 21)], &jpeg, None));
        }
        let mut reader = Cursor::new(bytes);

        let mut recovered = 0;
        loop {
            match read_packet(&mut reader, 0.7) {
                Ok(Some(frame)) => {
                    assert!(frame.fingertip.is_some());
                    recovered += 1;
                }
                Ok(None) => {}
                Err(TrackingError::Disconnected) => break,
                Err(err) => panic!("unexpected error: {err}"),
            }
        }
        assert_eq!(recovered, 5);
    }

    #[test]
    fn oversized_frame_len_is_rejected() {
        let header = format!(
            "{{\"width\":1,\"height\":1,\"frame_len\":{}}}\n",
            usize::MAX
        );
        assert!(matches!(
            read_packet(&mut Cursor::new(header.into_bytes()), 0.7),
            Err(TrackingError::Protocol(msg)) if msg.contains("frame_len")
        ));

        let header = format!(
            "{{\"width\":1,\"height\":1,\"frame_len\":{}}}\n",
            MAX_FRAME_LEN + 1
        );
        assert!(matches!(
            read_packet(&mut Cursor::new(header.into_bytes()), 0.7),
            Err(TrackingError::Protocol(_))
        ));
    }

    #[test]
    fn frame_size_mismatch_keeps_the_decoded_image() {
        let jpeg = encode_jpeg(&RgbImage::new(32, 24), 80).unwrap();
        let mut reader = Cursor::new(packet(&[], &jpeg, None));

        let frame = read_packet(&mut reader, 0.7).unwrap().unwrap();
        assert_eq!((frame.width, frame.height), (640, 480));
        assert_eq!(frame.image.map(|i| i.dimensions()), Some((32, 24)));
    }

    #[test]
    fn args_carry_tracker_settings() {
        let config = TrackerConfig::default();
        let args = bridge_args(&config);
        assert_eq!(args[0], "scripts/hand_bridge.py");
        let joined = args.join(" ");
        assert!(joined.contains("--camera 0"));
        assert!(joined.contains("--width 640 --height 480"));
        assert!(joined.contains("--max-hands 1"));
        assert!(joined.contains("--min-detection-confidence 0.7"));
        assert!(joined.ends_with("--mirror"));
    }

    #[test]
    fn missing_executable_reports_spawn_error() {
        let config = TrackerConfig {
            command: "/nonexistent/fingerpaint-tracker".into(),
            args: Vec::new(),
            ..TrackerConfig::default()
        };
        assert!(matches!(
            BridgeSource::spawn(&config),
            Err(TrackingError::Spawn { .. })
        ));
    }
}

//! `multipart/x-mixed-replace` (MJPEG) streaming.

use crate::backend::JpegFrame;
use axum::body::{Body, Bytes};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Multipart boundary used by both feeds.
pub const BOUNDARY: &str = "frame";

/// Wraps one JPEG as a multipart part.
pub fn multipart_part(jpeg: &[u8]) -> Vec<u8> {
    let head = format!("--{BOUNDARY}\r\nContent-Type: image/jpeg\r\n\r\n");
    let mut part = Vec::with_capacity(head.len() + jpeg.len() + 2);
    part.extend_from_slice(head.as_bytes());
    part.extend_from_slice(jpeg);
    part.extend_from_slice(b"\r\n");
    part
}

/// Emits the latest frame once per tick, skipping ticks with no frame yet.
///
/// The stream ends when `closing` flips to true or the publisher goes away.
pub fn mjpeg_stream(
    frames: watch::Receiver<JpegFrame>,
    closing: watch::Receiver<bool>,
    interval: Duration,
) -> impl Stream<Item = Result<Bytes, Infallible>> + Send + 'static {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    futures::stream::unfold(
        (frames, closing, ticker),
        |(frames, closing, mut ticker)| async move {
            loop {
                ticker.tick().await;
                if *closing.borrow() || frames.has_changed().is_err() {
                    return None;
                }
                let frame = frames.borrow().clone();
                if let Some(jpeg) = frame {
                    let part = Bytes::from(multipart_part(&jpeg));
                    return Some((Ok(part), (frames, closing, ticker)));
                }
            }
        },
    )
}

/// Streaming response for one feed.
pub fn mjpeg_response(
    frames: watch::Receiver<JpegFrame>,
    closing: watch::Receiver<bool>,
    interval: Duration,
) -> Response {
    let body = Body::from_stream(mjpeg_stream(frames, closing, interval));
    (
        [
            (
                header::CONTENT_TYPE,
                format!("multipart/x-mixed-replace; boundary={BOUNDARY}"),
            ),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::Arc;

    #[test]
    fn part_framing() {
        let part = multipart_part(&[0xFF, 0xD8, 0xFF, 0xD9]);
        let mut expected = b"--frame\r\nContent-Type: image/jpeg\r\n\r\n".to_vec();
        expected.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0xD9]);
        expected.extend_from_slice(b"\r\n");
        assert_eq!(part, expected);
    }

    #[tokio::test]
    async fn stream_waits_for_first_frame_and_stops_when_closing() {
        let (frame_tx, frame_rx) = watch::channel::<JpegFrame>(None);
        let (closing_tx, closing_rx) = watch::channel(false);
        let mut stream = Box::pin(mjpeg_stream(
            frame_rx,
            closing_rx,
            Duration::from_millis(5),
        ));

        let publisher = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            frame_tx.send_replace(Some(Arc::new(vec![1, 2, 3])));
            frame_tx
        });

        let first = stream.next().await.unwrap().unwrap();
        assert!(first.starts_with(b"--frame\r\n"));
        assert!(first.ends_with(&[1, 2, 3, b'\r', b'\n']));

        let _frame_tx = publisher.await.unwrap();
        closing_tx.send_replace(true);
        assert!(stream.next().await.is_none());
    }
}

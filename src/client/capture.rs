use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::debug;

use crate::client::decode::{decode_luma, DecodeOutcome, Decoded};
use crate::client::error::ClientError;

/// One grayscale frame from a capture device.
pub struct Frame {
    pub luma: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// A live source of camera frames. `release` frees the device and is called
/// on every exit path of the scan loop.
#[async_trait]
pub trait FrameSource {
    async fn grab(&mut self) -> Result<Frame, ClientError>;
    async fn release(&mut self);
}

/// Decodes a single frame. Split from the loop so the loop itself needs no
/// real barcodes to test.
pub trait FrameDecoder {
    fn decode(&self, frame: &Frame) -> DecodeOutcome;
}

/// The external barcode decoder applied to a frame's luma plane.
pub struct BarcodeFrameDecoder;

impl FrameDecoder for BarcodeFrameDecoder {
    fn decode(&self, frame: &Frame) -> DecodeOutcome {
        decode_luma(frame.luma.clone(), frame.width, frame.height)
    }
}

/// Poll frames and feed them to the decoder until one decodes, the cancel
/// flag flips, or the source fails. `Ok(None)` means canceled. Per-frame
/// decode misses are ignored and polling continues.
pub async fn scan_until_found<S, D>(
    source: &mut S,
    decoder: &D,
    cancel: watch::Receiver<bool>,
) -> Result<Option<Decoded>, ClientError>
where
    S: FrameSource + Send,
    D: FrameDecoder,
{
    loop {
        if *cancel.borrow() {
            source.release().await;
            return Ok(None);
        }

        let frame = match source.grab().await {
            Ok(frame) => frame,
            Err(err) => {
                source.release().await;
                return Err(err);
            }
        };

        // The user may have canceled while the frame was in flight.
        if *cancel.borrow() {
            source.release().await;
            return Ok(None);
        }

        match decoder.decode(&frame) {
            DecodeOutcome::Found(decoded) => {
                source.release().await;
                return Ok(Some(decoded));
            }
            DecodeOutcome::NotFound => debug!("no barcode in frame"),
        }
    }
}

/// Frame source that polls an HTTP camera's snapshot endpoint.
pub struct HttpCamera {
    client: reqwest::Client,
    snapshot_url: String,
    poll_interval: Duration,
}

impl HttpCamera {
    pub fn new(snapshot_url: impl Into<String>, poll_interval: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            snapshot_url: snapshot_url.into(),
            poll_interval,
        }
    }
}

#[async_trait]
impl FrameSource for HttpCamera {
    async fn grab(&mut self) -> Result<Frame, ClientError> {
        tokio::time::sleep(self.poll_interval).await;

        let bytes = self
            .client
            .get(&self.snapshot_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let luma = image::load_from_memory(&bytes)?.to_luma8();
        let (width, height) = luma.dimensions();

        Ok(Frame {
            luma: luma.into_raw(),
            width,
            height,
        })
    }

    async fn release(&mut self) {
        debug!("camera released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_frame() -> Frame {
        Frame {
            luma: vec![0; 4],
            width: 2,
            height: 2,
        }
    }

    /// Serves a fixed number of frames; optionally flips the cancel flag
    /// after a given grab.
    struct ScriptedSource {
        grabs: usize,
        released: bool,
        cancel_after: Option<(usize, watch::Sender<bool>)>,
    }

    #[async_trait]
    impl FrameSource for ScriptedSource {
        async fn grab(&mut self) -> Result<Frame, ClientError> {
            self.grabs += 1;
            if let Some((after, sender)) = &self.cancel_after {
                if self.grabs >= *after {
                    sender.send(true).unwrap();
                }
            }
            Ok(blank_frame())
        }

        async fn release(&mut self) {
            self.released = true;
        }
    }

    /// Decodes successfully on the nth call.
    struct DecodeOnNth {
        n: usize,
        calls: std::cell::Cell<usize>,
    }

    impl FrameDecoder for DecodeOnNth {
        fn decode(&self, _frame: &Frame) -> DecodeOutcome {
            self.calls.set(self.calls.get() + 1);
            if self.calls.get() >= self.n {
                DecodeOutcome::Found(Decoded {
                    text: "012345678905".to_string(),
                    symbology: "UPC_A".to_string(),
                })
            } else {
                DecodeOutcome::NotFound
            }
        }
    }

    struct NeverDecodes;

    impl FrameDecoder for NeverDecodes {
        fn decode(&self, _frame: &Frame) -> DecodeOutcome {
            DecodeOutcome::NotFound
        }
    }

    #[tokio::test]
    async fn stops_on_first_successful_decode_and_releases_the_device() {
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        let mut source = ScriptedSource {
            grabs: 0,
            released: false,
            cancel_after: None,
        };
        let decoder = DecodeOnNth {
            n: 3,
            calls: std::cell::Cell::new(0),
        };

        let decoded = scan_until_found(&mut source, &decoder, cancel_rx)
            .await
            .unwrap()
            .expect("a decode");

        assert_eq!(decoded.text, "012345678905");
        assert_eq!(source.grabs, 3);
        assert!(source.released);
    }

    #[tokio::test]
    async fn cancellation_before_the_first_frame_releases_the_device() {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        cancel_tx.send(true).unwrap();
        let mut source = ScriptedSource {
            grabs: 0,
            released: false,
            cancel_after: None,
        };

        let result = scan_until_found(&mut source, &NeverDecodes, cancel_rx)
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(source.grabs, 0);
        assert!(source.released);
    }

    #[tokio::test]
    async fn cancellation_mid_scan_stops_the_loop() {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let mut source = ScriptedSource {
            grabs: 0,
            released: false,
            cancel_after: Some((2, cancel_tx)),
        };

        let result = scan_until_found(&mut source, &NeverDecodes, cancel_rx)
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(source.grabs, 2);
        assert!(source.released);
    }
}

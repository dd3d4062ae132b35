use std::path::Path;

use tracing::debug;

/// A successfully read barcode: its payload text and the symbology the
/// decoder reported (EAN-13, UPC-A, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub symbology: String,
}

/// Outcome of a decode attempt. A decoder error and "no barcode in this
/// image" are the same thing from the caller's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    Found(Decoded),
    NotFound,
}

/// One technique for pointing the external decoder at an image file.
pub trait DecodeStrategy {
    fn name(&self) -> &'static str;
    fn attempt(&self, path: &Path) -> DecodeOutcome;
}

/// The decoder opens and reads the file itself.
struct DirectFile;

impl DecodeStrategy for DirectFile {
    fn name(&self) -> &'static str {
        "direct-file"
    }

    fn attempt(&self, path: &Path) -> DecodeOutcome {
        let Some(path) = path.to_str() else {
            return DecodeOutcome::NotFound;
        };

        match rxing::helpers::detect_in_file(path, None) {
            Ok(result) => DecodeOutcome::Found(Decoded {
                text: result.getText().to_string(),
                symbology: result.getBarcodeFormat().to_string(),
            }),
            Err(_) => DecodeOutcome::NotFound,
        }
    }
}

/// The raster is decoded and grayscaled by the `image` crate first, then fed
/// to the decoder as a luma plane.
struct RenderedBitmap;

impl DecodeStrategy for RenderedBitmap {
    fn name(&self) -> &'static str {
        "rendered-bitmap"
    }

    fn attempt(&self, path: &Path) -> DecodeOutcome {
        let Ok(img) = image::open(path) else {
            return DecodeOutcome::NotFound;
        };

        let luma = img.to_luma8();
        let (width, height) = luma.dimensions();

        decode_luma(luma.into_raw(), width, height)
    }
}

/// Raw RGB pixels converted to a luma plane by hand (BT.601 weights).
struct RawPixelBuffer;

impl DecodeStrategy for RawPixelBuffer {
    fn name(&self) -> &'static str {
        "raw-pixel-buffer"
    }

    fn attempt(&self, path: &Path) -> DecodeOutcome {
        let Ok(img) = image::open(path) else {
            return DecodeOutcome::NotFound;
        };

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let luma = rgb
            .pixels()
            .map(|pixel| {
                let [r, g, b] = pixel.0;
                ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000) as u8
            })
            .collect();

        decode_luma(luma, width, height)
    }
}

/// Run the external decoder over a grayscale pixel buffer.
pub(crate) fn decode_luma(luma: Vec<u8>, width: u32, height: u32) -> DecodeOutcome {
    match rxing::helpers::detect_in_luma(luma, height, width, None) {
        Ok(result) => DecodeOutcome::Found(Decoded {
            text: result.getText().to_string(),
            symbology: result.getBarcodeFormat().to_string(),
        }),
        Err(_) => DecodeOutcome::NotFound,
    }
}

/// The strategies in the order they are tried.
pub fn strategies() -> Vec<Box<dyn DecodeStrategy>> {
    vec![
        Box::new(DirectFile),
        Box::new(RenderedBitmap),
        Box::new(RawPixelBuffer),
    ]
}

/// Try to read a barcode out of an image file, one strategy at a time; the
/// first hit wins and the rest are skipped.
pub fn decode_image(path: &Path) -> DecodeOutcome {
    decode_with(&strategies(), path)
}

pub fn decode_with(strategies: &[Box<dyn DecodeStrategy>], path: &Path) -> DecodeOutcome {
    for strategy in strategies {
        match strategy.attempt(path) {
            DecodeOutcome::Found(decoded) => {
                debug!(strategy = strategy.name(), text = %decoded.text, "barcode decoded");
                return DecodeOutcome::Found(decoded);
            }
            DecodeOutcome::NotFound => {
                debug!(strategy = strategy.name(), "strategy found nothing");
            }
        }
    }

    DecodeOutcome::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type AttemptLog = Rc<RefCell<Vec<&'static str>>>;

    struct Scripted {
        name: &'static str,
        outcome: DecodeOutcome,
        log: AttemptLog,
    }

    impl Scripted {
        fn found(name: &'static str, text: &str, log: &AttemptLog) -> Box<Self> {
            Box::new(Scripted {
                name,
                outcome: DecodeOutcome::Found(Decoded {
                    text: text.to_string(),
                    symbology: "EAN_13".to_string(),
                }),
                log: Rc::clone(log),
            })
        }

        fn not_found(name: &'static str, log: &AttemptLog) -> Box<Self> {
            Box::new(Scripted {
                name,
                outcome: DecodeOutcome::NotFound,
                log: Rc::clone(log),
            })
        }
    }

    impl DecodeStrategy for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        fn attempt(&self, _path: &Path) -> DecodeOutcome {
            self.log.borrow_mut().push(self.name);
            self.outcome.clone()
        }
    }

    #[test]
    fn first_successful_strategy_wins_and_later_ones_are_skipped() {
        let log = AttemptLog::default();
        let strategies: Vec<Box<dyn DecodeStrategy>> = vec![
            Scripted::not_found("first", &log),
            Scripted::found("second", "012345678905", &log),
            Scripted::found("third", "999", &log),
        ];

        let outcome = decode_with(&strategies, Path::new("whatever.png"));

        match outcome {
            DecodeOutcome::Found(decoded) => assert_eq!(decoded.text, "012345678905"),
            DecodeOutcome::NotFound => panic!("expected a decode"),
        }
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn exhausting_every_strategy_reports_not_found() {
        let log = AttemptLog::default();
        let strategies: Vec<Box<dyn DecodeStrategy>> = vec![
            Scripted::not_found("first", &log),
            Scripted::not_found("second", &log),
        ];

        let outcome = decode_with(&strategies, Path::new("whatever.png"));

        assert_eq!(outcome, DecodeOutcome::NotFound);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn real_strategies_treat_an_unreadable_file_as_not_found() {
        let outcome = decode_image(Path::new("definitely/not/a/real/file.png"));

        assert_eq!(outcome, DecodeOutcome::NotFound);
    }
}

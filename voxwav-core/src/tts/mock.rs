use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use super::provider::TextToSpeech;
use super::types::VoiceName;

/// Mock behavior for the mock provider
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return a payload encoding `pcm` (raw little-endian i16 bytes)
    Success { pcm: Vec<u8> },
    /// Return this exact payload, valid base64 or not
    RawPayload { payload: String },
    /// Succeed without audio
    Empty,
    /// Fail the call with this message
    Error { message: String },
    /// Wait, then apply the inner behavior
    Delayed {
        delay: Duration,
        behavior: Box<MockBehavior>,
    },
    /// Apply behaviors in order, one per call, then fall back to silence
    BehaviorQueue { behaviors: Vec<MockBehavior> },
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self::Success {
            pcm: silence(240),
        }
    }
}

impl MockBehavior {
    pub fn samples(samples: &[i16]) -> Self {
        Self::Success {
            pcm: samples.iter().flat_map(|s| s.to_le_bytes()).collect(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn delayed(delay: Duration, behavior: MockBehavior) -> Self {
        Self::Delayed {
            delay,
            behavior: Box::new(behavior),
        }
    }
}

fn silence(samples: usize) -> Vec<u8> {
    vec![0u8; samples * 2]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    pub text: String,
    pub voice: VoiceName,
}

/// Mock TTS provider for testing
#[derive(Clone, Default)]
pub struct MockTts {
    behavior: Arc<Mutex<MockBehavior>>,
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockTts {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn pop_behavior_from_queue(behavior: &mut MockBehavior) -> MockBehavior {
        if let MockBehavior::BehaviorQueue { behaviors } = behavior {
            if behaviors.is_empty() {
                return MockBehavior::default();
            }
            return behaviors.remove(0);
        }
        behavior.clone()
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn get_call_count(&self) -> usize {
        self.captured_requests.lock().unwrap().len()
    }

    pub fn get_captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().unwrap().clone()
    }

    pub fn get_last_captured_request(&self) -> Option<CapturedRequest> {
        self.captured_requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextToSpeech for MockTts {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn request_speech(&self, text: &str, voice: VoiceName) -> Result<Option<String>> {
        self.captured_requests
            .lock()
            .unwrap()
            .push(CapturedRequest {
                text: text.to_string(),
                voice,
            });

        let mut effective = {
            let mut behavior = self.behavior.lock().unwrap();
            Self::pop_behavior_from_queue(&mut behavior)
        };

        loop {
            match effective {
                MockBehavior::Success { pcm } => return Ok(Some(STANDARD.encode(pcm))),
                MockBehavior::RawPayload { payload } => return Ok(Some(payload)),
                MockBehavior::Empty => return Ok(None),
                MockBehavior::Error { message } => return Err(anyhow::anyhow!(message)),
                MockBehavior::Delayed { delay, behavior } => {
                    tokio::time::sleep(delay).await;
                    effective = *behavior;
                }
                MockBehavior::BehaviorQueue { .. } => {
                    panic!("Bug: nested BehaviorQueue detected. Test setup error - BehaviorQueues cannot contain other BehaviorQueues")
                }
            }
        }
    }
}

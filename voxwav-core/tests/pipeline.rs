use std::sync::Arc;
use std::time::Duration;

use voxwav_core::audio::{AudioError, WavHeader};
use voxwav_core::pipeline::{render_wav, SpeechPipeline, SynthesisError};
use voxwav_core::tts::mock::{MockBehavior, MockTts};
use voxwav_core::tts::VoiceName;

fn pipeline(behavior: MockBehavior) -> (SpeechPipeline, MockTts) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let mock = MockTts::new(behavior);
    (SpeechPipeline::new(Arc::new(mock.clone())), mock)
}

#[tokio::test]
async fn test_synthesize_produces_wav() {
    let (pipeline, mock) = pipeline(MockBehavior::samples(&[0, 32767, -32768, 100]));

    let resource = pipeline
        .synthesize_to_audio("Hola mundo", VoiceName::Charon)
        .await
        .unwrap();

    let container = resource.container();
    assert_eq!(container.len(), 4 * 2 + 44);
    assert_eq!(container.mime_type(), "audio/wav");
    assert_eq!(
        WavHeader::parse(container.as_bytes()).as_ref(),
        Some(container.header())
    );
    assert_eq!(container.header().sample_rate, 24_000);
    assert_eq!(container.header().data_chunk_size, 8);
    assert_eq!(resource.duration(), Duration::from_secs_f64(4.0 / 24_000.0));

    let data = container.data();
    assert_eq!(&data[0..2], &0i16.to_le_bytes());
    assert_eq!(&data[4..6], &i16::MIN.to_le_bytes());

    assert!(pipeline.store().contains(resource.url()));

    let request = mock.get_last_captured_request().unwrap();
    assert_eq!(request.text, "Hola mundo");
    assert_eq!(request.voice, VoiceName::Charon);
}

#[tokio::test]
async fn test_empty_pcm_gives_header_only_container() {
    let (pipeline, _mock) = pipeline(MockBehavior::Success { pcm: Vec::new() });

    // An empty byte stream encodes to an empty (but present) base64 string,
    // which counts as no audio at all.
    let result = pipeline.synthesize_to_audio("Hola", VoiceName::Puck).await;
    assert!(matches!(result, Err(SynthesisError::EmptyResponse)));

    let container = render_wav("", 24_000).unwrap();
    assert_eq!(container.len(), 44);
    assert_eq!(container.header().data_chunk_size, 0);
    assert_eq!(container.header().riff_chunk_size, 36);
}

#[tokio::test]
async fn test_empty_response() {
    let (pipeline, _mock) = pipeline(MockBehavior::Empty);

    let result = pipeline.synthesize_to_audio("Hola", VoiceName::Puck).await;
    assert!(matches!(result, Err(SynthesisError::EmptyResponse)));
    assert!(pipeline.store().is_empty());
}

#[tokio::test]
async fn test_upstream_error_keeps_message() {
    let (pipeline, _mock) = pipeline(MockBehavior::error("quota exceeded"));

    let result = pipeline.synthesize_to_audio("Hola", VoiceName::Puck).await;
    match result {
        Err(SynthesisError::Upstream(message)) => assert_eq!(message, "quota exceeded"),
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_decode_error_propagates() {
    let (pipeline, _mock) = pipeline(MockBehavior::RawPayload {
        payload: "not*base64".to_string(),
    });

    let result = pipeline.synthesize_to_audio("Hola", VoiceName::Puck).await;
    assert!(matches!(
        result,
        Err(SynthesisError::Audio(AudioError::Decode(_)))
    ));
    assert!(pipeline.store().is_empty());
}

#[tokio::test]
async fn test_alignment_error_propagates() {
    // "AAAA" decodes to three zero bytes
    let (pipeline, _mock) = pipeline(MockBehavior::RawPayload {
        payload: "AAAA".to_string(),
    });

    let result = pipeline.synthesize_to_audio("Hola", VoiceName::Puck).await;
    assert!(matches!(
        result,
        Err(SynthesisError::Audio(AudioError::Alignment { len: 3 }))
    ));
}

#[tokio::test]
async fn test_blank_text_skips_provider() {
    let (pipeline, mock) = pipeline(MockBehavior::default());

    let result = pipeline.synthesize_to_audio("   \n", VoiceName::Puck).await;
    assert!(matches!(result, Err(SynthesisError::EmptyText)));
    assert_eq!(mock.get_call_count(), 0);
}

#[tokio::test]
async fn test_every_call_hits_provider() {
    let (pipeline, mock) = pipeline(MockBehavior::default());

    let first = pipeline
        .synthesize_to_audio("Hola", VoiceName::Kore)
        .await
        .unwrap();
    let second = pipeline
        .synthesize_to_audio("Hola", VoiceName::Kore)
        .await
        .unwrap();

    assert_eq!(mock.get_call_count(), 2);
    assert_ne!(first.url(), second.url());
    assert_eq!(first.container().as_bytes(), second.container().as_bytes());
}

#[tokio::test]
async fn test_configured_sample_rate() {
    let (pipeline, _mock) = pipeline(MockBehavior::samples(&[1, 2, 3]));
    let pipeline = pipeline.with_sample_rate(16_000);

    let resource = pipeline
        .synthesize_to_audio("Hola", VoiceName::Fenrir)
        .await
        .unwrap();
    let header = resource.container().header();
    assert_eq!(header.sample_rate, 16_000);
    assert_eq!(header.byte_rate, 32_000);
}

#[test]
fn test_render_known_scenario() {
    // [0x00, 0x00, 0xFF, 0x7F] in base64
    let container = render_wav("AAD/fw==", 24_000).unwrap();
    let bytes = container.as_bytes();

    assert_eq!(bytes.len(), 4 + 44);
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
    assert_eq!(&bytes[36..40], b"data");
    assert_eq!(i16::from_le_bytes([bytes[44], bytes[45]]), 0);
    assert_eq!(i16::from_le_bytes([bytes[46], bytes[47]]), 32766);
}

#[test]
fn test_render_accepts_wrapped_payload() {
    let wrapped = render_wav("AAD/\nfw==\n", 24_000).unwrap();
    let single = render_wav("AAD/fw==", 24_000).unwrap();
    assert_eq!(wrapped.as_bytes(), single.as_bytes());
}

#[test]
fn test_render_rejects_truncated_padding() {
    let result = render_wav("AAD/fw=", 24_000);
    assert!(matches!(result, Err(AudioError::Decode(_))));
}

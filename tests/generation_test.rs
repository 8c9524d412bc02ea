use talentscout_backend::error::Error;
use talentscout_backend::services::ai_service::AiService;
use talentscout_backend::services::gemini::GeminiClient;

#[tokio::test]
async fn generation_without_an_api_key_fails_with_an_actionable_error() {
    let service = AiService::new(GeminiClient::disabled());
    let err = service
        .generate_job_details("Senior product designer, Figma expert")
        .await
        .unwrap_err();

    match err {
        Error::Generation(message) => {
            assert!(message.contains("GEMINI_API_KEY"), "{}", message);
        }
        other => panic!("expected a generation error, got {:?}", other),
    }
}

#[tokio::test]
async fn generation_rejects_an_empty_prompt() {
    let service = AiService::new(GeminiClient::disabled());
    assert!(matches!(
        service.generate_job_details("   ").await,
        Err(Error::BadRequest(_))
    ));
}

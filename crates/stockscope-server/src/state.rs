//! Shared application state

use std::sync::Arc;
use stockscope_core::model::build_generator;
use stockscope_core::{
    AlphaVantageClient, InsightConfig, LlmReranker, MarketData, NewsCurator, QuestionAnswerer,
    Summarizer, prompts,
};
use stockscope_llm::TextGenerator;
use stockscope_prompt::PromptRegistry;
use tracing::info;

/// Immutable handles shared by every request
///
/// Pipeline components are cheap wrappers around these handles and are built
/// per request.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn MarketData>,
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub prompts: Arc<PromptRegistry>,
    pub llm_rerank: bool,
}

impl AppState {
    pub fn new(
        gateway: Arc<dyn MarketData>,
        generator: Option<Arc<dyn TextGenerator>>,
        prompts: Arc<PromptRegistry>,
    ) -> Self {
        Self {
            gateway,
            generator,
            prompts,
            llm_rerank: false,
        }
    }

    /// Enable or disable model reranking of news
    pub fn with_rerank(mut self, enabled: bool) -> Self {
        self.llm_rerank = enabled;
        self
    }

    /// Wire the Alpha Vantage gateway, the configured model and the prompt set
    pub fn from_config(config: &InsightConfig) -> stockscope_core::Result<Self> {
        let gateway = Arc::new(AlphaVantageClient::new(config)?);
        let generator = build_generator(config)?;
        let prompts = Arc::new(prompts::default_registry()?);

        info!(
            provider = %config.model_provider,
            model_configured = generator.is_some(),
            llm_rerank = config.llm_rerank,
            "application state ready"
        );

        Ok(Self::new(gateway, generator, prompts).with_rerank(config.llm_rerank))
    }

    /// News curator, reranking through the model when enabled and available
    pub fn curator(&self) -> NewsCurator {
        match (&self.generator, self.llm_rerank) {
            (Some(generator), true) => NewsCurator::with_reranker(Arc::new(LlmReranker::new(
                Arc::clone(generator),
                Arc::clone(&self.prompts),
            ))),
            _ => NewsCurator::new(),
        }
    }

    pub fn summarizer(&self) -> Summarizer {
        Summarizer::new(self.generator.clone(), Arc::clone(&self.prompts))
    }

    pub fn answerer(&self) -> QuestionAnswerer {
        QuestionAnswerer::new(self.generator.clone(), Arc::clone(&self.prompts))
    }
}

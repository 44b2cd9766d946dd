//! Client code for privrank.
//!
//! This crate provides the working half of the privacy rater: page fetching,
//! document view construction, policy content location, the chat-completion
//! client, rating parsing, the offline keyword heuristic, and the analysis
//! orchestrator that ties them to the cache in `privrank-core`.

pub mod analyze;
pub mod completion;
pub mod extract;
pub mod fetch;
pub mod heuristic;
pub mod parse;

pub use analyze::{AnalysisOutcome, Analyzer, AnalyzerConfig, rubric};
pub use completion::{
    ChatMessage, ChatRequest, CompletionClient, CompletionConfig, CompletionError, CompletionResponse,
    CompletionTransport,
};
pub use extract::{DocumentView, HeadingBlock, LocateConfig, PageContent, POLICY_PHRASES, locate, locate_html};
pub use fetch::{FetchClient, FetchConfig, FetchResponse, UrlError, canonicalize, host_key};
pub use heuristic::{KeywordScore, keyword_score};
pub use parse::{ParsedRating, parse};

//! Chat advice handlers.

mod submit_chat_message;

pub use submit_chat_message::{
    system_prompt, AdviceSettings, AdviceStage, SubmitChatMessageCommand,
    SubmitChatMessageHandler, SubmitChatMessageResult, CHAT_ENDPOINT, DEFAULT_CONTEXT,
    FALLBACK_RESPONSE,
};

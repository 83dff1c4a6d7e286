pub mod dialoguer_prompt;

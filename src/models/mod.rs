/// Bidirectional LSTM for binary text classification
pub mod bilstm;

/// Construction options for a [`Lexer`](crate::Lexer).
///
/// ```rust
/// use statelex::LexerConfig;
///
/// let config = LexerConfig {
///     read_buffer_size: 64 * 1024,
///     ..Default::default()
/// };
/// assert_eq!(config.token_capacity, 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    /// Capacity of the buffered reader wrapped around the source, in bytes.
    pub read_buffer_size: usize,
    /// Initial capacity of the token text buffer, in bytes.
    pub token_capacity: usize,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: 4096,
            token_capacity: 1024,
        }
    }
}

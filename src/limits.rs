//! Resource budgets for a single tokenize + parse call.
//!
//! Both stages read the same [`Limits`]: the tokenizer rejects oversized
//! input before scanning, and the parser bounds its recursion so that
//! pathological nesting fails with an error instead of exhausting the stack.

/// The default maximum nesting depth (e.g., `[[[]]]`).
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Hard ceiling on the nesting budget.
///
/// Each level costs two stack frames in the recursive parser; at this depth
/// an unoptimized build still fits in a 2 MiB thread stack. Larger budgets
/// are clamped.
pub const MAX_SUPPORTED_DEPTH: usize = 256;

/// The default maximum size of an input document (10MB).
pub const DEFAULT_MAX_INPUT_SIZE: usize = 10 * 1024 * 1024;

/// Resource limits applied while tokenizing and parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input size in bytes.
    pub max_input_size: usize,
    /// Maximum number of nested objects/arrays, counting the root as 1.
    /// The parser never goes past [`MAX_SUPPORTED_DEPTH`], whatever this says.
    pub max_nesting_depth: usize,
}

impl Limits {
    /// Tight limits for untrusted input.
    pub const fn strict() -> Self {
        Self {
            max_input_size: 1024 * 1024, // 1 MiB
            max_nesting_depth: 32,
        }
    }

    /// Generous limits for trusted, machine-generated documents.
    pub const fn lenient() -> Self {
        Self {
            max_input_size: 256 * 1024 * 1024, // 256 MiB
            max_nesting_depth: MAX_SUPPORTED_DEPTH,
        }
    }

    /// Returns a copy with a different nesting budget, clamped to
    /// [`MAX_SUPPORTED_DEPTH`].
    pub const fn with_max_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = if max_nesting_depth > MAX_SUPPORTED_DEPTH {
            MAX_SUPPORTED_DEPTH
        } else {
            max_nesting_depth
        };
        self
    }

    /// Returns a copy with a different input size budget.
    pub const fn with_max_input_size(mut self, max_input_size: usize) -> Self {
        self.max_input_size = max_input_size;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_size: DEFAULT_MAX_INPUT_SIZE,
            max_nesting_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

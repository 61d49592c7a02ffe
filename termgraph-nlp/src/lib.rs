// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Termgraph NLP
//!
//! Pure, synchronous text analysis over dependency-parsed sentences:
//!
//! ## Pipeline
//!
//! 1. [`conllu`] reads parser output into [`Sentence`]s
//! 2. [`NounGroupSegmenter`] extracts noun/adjective/adposition clusters
//! 3. [`decompose`] splits a cluster into type, attributes and components
//! 4. [`definition`] finds "X is a ..." sentences for a term
//! 5. [`ParsedDocument`] indexes noun groups across a whole page
//!
//! No I/O happens here; the parser itself is a remote collaborator.

pub mod conllu;
pub mod decomposer;
pub mod definition;
pub mod document;
pub mod segmenter;
pub mod word;

pub use decomposer::{decompose, Decomposition};
pub use definition::is_definition_of;
pub use document::{GroupKind, NounGroupCount, ParsedDocument, ParsedSentence, TermVariants};
pub use segmenter::{NounGroup, NounGroupSegmenter};
pub use word::{Sentence, Word};

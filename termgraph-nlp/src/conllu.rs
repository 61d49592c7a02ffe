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

//! CoNLL-U reader
//!
//! Ten tab-separated columns per word line:
//! `ID FORM LEMMA UPOS XPOS FEATS HEAD DEPREL DEPS MISC`.
//! Sentences are separated by blank lines; `# text = ...` comments carry
//! the raw sentence text. Multi-word token ranges (`1-2`) and empty nodes
//! (`3.1`) are skipped.

use crate::word::{Sentence, Word};
use termgraph_core::{Result, TermGraphError};
use tracing::trace;

const COLUMNS: usize = 10;

/// Parse a CoNLL-U document into sentences
pub fn parse(input: &str) -> Result<Vec<Sentence>> {
    let mut sentences = Vec::new();
    let mut text: Option<String> = None;
    let mut words: Vec<Word> = Vec::new();

    for (line_no, line) in input.lines().enumerate() {
        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() {
            flush(&mut sentences, &mut text, &mut words);
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            if let Some(raw) = comment.trim_start().strip_prefix("text") {
                if let Some(value) = raw.trim_start().strip_prefix('=') {
                    text = Some(value.trim().to_string());
                }
            }
            continue;
        }

        if let Some(word) = parse_word_line(line, line_no + 1)? {
            words.push(word);
        }
    }
    flush(&mut sentences, &mut text, &mut words);

    tracing::debug!(sentences = sentences.len(), "read CoNLL-U");
    Ok(sentences)
}

fn flush(sentences: &mut Vec<Sentence>, text: &mut Option<String>, words: &mut Vec<Word>) {
    if words.is_empty() {
        *text = None;
        return;
    }
    let words = std::mem::take(words);
    let sentence = match text.take() {
        Some(text) => Sentence::new(text, words),
        None => Sentence::from_words(words),
    };
    sentences.push(sentence);
}

fn parse_word_line(line: &str, line_no: usize) -> Result<Option<Word>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != COLUMNS {
        return Err(TermGraphError::FormatError {
            line: line_no,
            message: format!("expected {} columns, found {}", COLUMNS, fields.len()),
        });
    }

    let id_field = fields[0];
    if id_field.contains('-') || id_field.contains('.') {
        trace!(line = line_no, id = id_field, "skipping token range or empty node");
        return Ok(None);
    }

    let id = parse_index(id_field, line_no, "ID")?;
    let head = if fields[6] == "_" {
        0
    } else {
        parse_index(fields[6], line_no, "HEAD")?
    };

    Ok(Some(Word {
        id,
        text: fields[1].to_string(),
        lemma: fields[2].to_string(),
        upos: fields[3].to_string(),
        xpos: underscore_empty(fields[4]),
        head,
        deprel: underscore_empty(fields[7]),
    }))
}

fn parse_index(field: &str, line_no: usize, column: &str) -> Result<usize> {
    field.parse().map_err(|_| TermGraphError::FormatError {
        line: line_no,
        message: format!("invalid {} value '{}'", column, field),
    })
}

fn underscore_empty(field: &str) -> String {
    if field == "_" {
        String::new()
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# newdoc\n\
# sent_id = 1\n\
# text = Soil moisture is a property.\n\
1\tSoil\tsoil\tNOUN\tNN\tNumber=Sing\t2\tcompound\t_\t_\n\
2\tmoisture\tmoisture\tNOUN\tNN\tNumber=Sing\t5\tnsubj\t_\t_\n\
3\tis\tbe\tAUX\tVBZ\t_\t5\tcop\t_\t_\n\
4\ta\ta\tDET\tDT\t_\t5\tdet\t_\t_\n\
5\tproperty\tproperty\tNOUN\tNN\t_\t0\troot\t_\tSpaceAfter=No\n\
6\t.\t.\tPUNCT\t.\t_\t5\tpunct\t_\t_\n\
\n\
# text = It's dry.\n\
1-2\tIt's\t_\t_\t_\t_\t_\t_\t_\t_\n\
1\tIt\tit\tPRON\tPRP\t_\t3\tnsubj\t_\t_\n\
2\t's\tbe\tAUX\tVBZ\t_\t3\tcop\t_\t_\n\
3\tdry\tdry\tADJ\tJJ\t_\t0\troot\t_\t_\n\
\n";

    #[test]
    fn test_parse_sentences() {
        let sentences = parse(SAMPLE).unwrap();
        assert_eq!(sentences.len(), 2);

        let first = &sentences[0];
        assert_eq!(first.text, "Soil moisture is a property.");
        assert_eq!(first.words.len(), 6);
        assert_eq!(first.words[1].deprel, "nsubj");
        assert_eq!(first.words[1].head, 5);
        assert_eq!(first.words[4].head, 0);

        // multi-word token range skipped
        assert_eq!(sentences[1].words.len(), 3);
        assert_eq!(sentences[1].words[0].text, "It");
    }

    #[test]
    fn test_missing_text_comment_joins_words() {
        let input = "1\tdrought\tdrought\tNOUN\tNN\t_\t0\troot\t_\t_\n";
        let sentences = parse(input).unwrap();
        assert_eq!(sentences[0].text, "drought");
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let input = "# text = x\n1\tx\tx\tNOUN\n";
        let err = parse(input).unwrap_err();
        assert!(matches!(err, TermGraphError::FormatError { line: 2, .. }));
    }
}

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

//! Integration tests for segmentation and decomposition

use proptest::prelude::*;
use termgraph_core::{PartOfSpeech, Shape};
use termgraph_nlp::{conllu, decompose, NounGroup, NounGroupSegmenter, ParsedDocument, Word};

fn tagged(tags: &[&str]) -> Vec<Word> {
    tags.iter()
        .enumerate()
        .map(|(i, upos)| {
            let text = format!("w{}", i);
            Word::tagged(i + 1, &text, &text, upos)
        })
        .collect()
}

/// Every part of a decomposition is strictly shorter than its parent,
/// so recursive decomposition terminates.
fn assert_shrinks(group: &NounGroup, depth: usize) {
    assert!(depth < 16, "decomposition did not terminate");
    for part in decompose(group).parts() {
        assert!(part.len() < group.len());
        assert_shrinks(part, depth + 1);
    }
}

proptest! {
    /// Segmented groups are well formed for arbitrary tag sequences
    #[test]
    fn prop_groups_are_well_formed(
        tags in proptest::collection::vec(
            prop_oneof!["NOUN", "ADJ", "ADP", "VERB", "DET", "PUNCT"],
            0..24,
        )
    ) {
        let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
        let groups = NounGroupSegmenter::new().segment(&tagged(&tags));

        for group in &groups {
            prop_assert!(!group.is_empty());
            prop_assert_eq!(group.pos_sequence.len(), group.lemma_sequence.len());
            prop_assert_eq!(group.pos_sequence.len(), group.words.len());
            prop_assert_eq!(group.pos_sequence.last(), Some(&PartOfSpeech::Noun));
            prop_assert_ne!(group.pos_sequence.first(), Some(&PartOfSpeech::Adposition));
            assert_shrinks(group, 0);
        }
    }
}

/// Literal noun-group case
#[test]
fn test_soil_moisture() {
    let words = vec![
        Word::tagged(1, "soil", "soil", "NOUN"),
        Word::tagged(2, "moisture", "moisture", "NOUN"),
    ];
    let groups = NounGroupSegmenter::new().segment(&words);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].key(), "soil moisture");
    assert_eq!(groups[0].shape, Shape::NounGroup);
}

/// No bare "terms" survives from an "in terms of" window
#[test]
fn test_in_terms_of_mass() {
    let words = vec![
        Word::tagged(1, "in", "in", "ADP"),
        Word::tagged(2, "terms", "term", "NOUN"),
        Word::tagged(3, "of", "of", "ADP"),
        Word::tagged(4, "mass", "mass", "NOUN"),
    ];
    let groups = NounGroupSegmenter::new().segment(&words);
    let keys: Vec<String> = groups.iter().map(|g| g.key()).collect();
    assert_eq!(keys, vec!["mass"]);
    for group in &groups {
        assert!(decompose(group).components.iter().all(|c| c.key() != "terms"));
    }
}

/// CoNLL-U input flows through to definition lookup
#[test]
fn test_conllu_to_definition() {
    let input = "# text = Evapotranspiration is the sum of evaporation and transpiration.\n\
1\tEvapotranspiration\tevapotranspiration\tNOUN\tNN\t_\t4\tnsubj\t_\t_\n\
2\tis\tbe\tAUX\tVBZ\t_\t4\tcop\t_\t_\n\
3\tthe\tthe\tDET\tDT\t_\t4\tdet\t_\t_\n\
4\tsum\tsum\tNOUN\tNN\t_\t0\troot\t_\t_\n\
5\tof\tof\tADP\tIN\t_\t6\tcase\t_\t_\n\
6\tevaporation\tevaporation\tNOUN\tNN\t_\t4\tnmod\t_\t_\n\
7\tand\tand\tCCONJ\tCC\t_\t8\tcc\t_\t_\n\
8\ttranspiration\ttranspiration\tNOUN\tNN\t_\t6\tconj\t_\t_\n\
9\t.\t.\tPUNCT\t.\t_\t4\tpunct\t_\t_\n";

    let sentences = conllu::parse(input).unwrap();
    let doc = ParsedDocument::new(vec![sentences]);
    assert_eq!(doc.find_definition("evapotranspiration"), Some((0, 0)));

    let keys: Vec<String> = doc
        .sentence(0, 0)
        .unwrap()
        .noun_groups
        .iter()
        .map(|g| g.key())
        .collect();
    assert_eq!(keys, vec!["evapotranspiration", "sum of evaporation", "transpiration"]);
}

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

//! Reserved top-level category names. Terms equal to one of these are stub
//! nodes: never decomposed, defined, or annotated.

pub const CATEGORY_NAMES: [&str; 18] = [
    "process",
    "property",
    "phenomenon",
    "role",
    "attribute",
    "matter",
    "body",
    "domain",
    "operator",
    "variable",
    "part",
    "trajectory",
    "form",
    "condition",
    "state",
    "abstraction",
    "equation",
    "expression",
];

pub fn is_reserved(term: &str) -> bool {
    let term = term.trim();
    CATEGORY_NAMES
        .iter()
        .any(|name| name.eq_ignore_ascii_case(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_names() {
        assert!(is_reserved("property"));
        assert!(is_reserved("Phenomenon"));
        assert!(!is_reserved("moisture"));
        assert!(!is_reserved("property value"));
    }
}

pub mod analysis;
pub mod core;
pub mod index;
pub mod query;
pub mod search;

/*
┌──────────────────────────────────────────────────────────────────────────┐
│                      QUENDRIX QUERY-REWRITING CORE                       │
└──────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────── QUERY LAYER ───────────────────────────────┐
│                                                                          │
│  ┌─────────────────────────┐        ┌──────────────────────────────┐     │
│  │ struct RangeQuery       │        │ struct WildcardQuery         │     │
│  │ • field: Option<String> │        │ • pattern: Term  (*, ?)      │     │
│  │ • lower/upper: Term?    │        │ • matches: Option<Vec<Term>> │     │
│  │ • inclusive: bool       │        │ • min_prefix_length (global) │     │
│  │ • matches: Option<Vec>  │        └──────────────────────────────┘     │
│  └─────────────────────────┘                                             │
│               │ rewrite(index)                   │ rewrite(index)        │
│               ▼                                  ▼                       │
│  ┌────────────────────────────────────────────────────────────────┐      │
│  │ enum Query  •  Empty  •  Term(TermQuery)  •  MultiTerm(OR set) │      │
│  └────────────────────────────────────────────────────────────────┘      │
│                                                                          │
│  trait SearchQuery: rewrite / query_terms / boost / highlight_matches    │
│  (optimize, create_weight, execute, matched_docs, score are rejected     │
│   on the rewrite-only shapes)                                            │
└──────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────── INDEX LAYER ───────────────────────────────┐
│                                                                          │
│  trait IndexReader (terms-stream cursor):                                │
│    field_names / reset_terms_stream / skip_to / current_term /           │
│    next_term / close_terms_stream                                        │
│                                                                          │
│  ┌──────────────────────────┐   ┌──────────────────────────────────┐     │
│  │ struct InMemoryIndex     │   │ struct Term                      │     │
│  │ • dictionary: fst::Map   │   │ • field: Option<String>          │     │
│  │ • cursor: Option<Term>   │   │ • text: String (byte-ordered)    │     │
│  └──────────────────────────┘   └──────────────────────────────────┘     │
└──────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────── ANALYSIS LAYER ──────────────────────────────┐
│                                                                          │
│  Analyzer (tokenizer + filters) ── default_analyzer() global             │
│  StandardTokenizer (unicode words) ── LowercaseFilter                    │
│  Highlighter trait consumes the matched word list                        │
└──────────────────────────────────────────────────────────────────────────┘

Resource guards: core::config::terms_per_query_limit() caps the number of
terms one rewrite may collect; WildcardQuery::min_prefix_length() bounds
worst-case dictionary scans. Both are read once per rewrite.
*/

pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::term::Term;
pub use crate::index::IndexReader;
pub use crate::index::memory::{InMemoryIndex, InMemoryIndexBuilder};
pub use crate::query::SearchQuery;
pub use crate::query::primitive::Query;
pub use crate::query::range::RangeQuery;
pub use crate::query::wildcard::WildcardQuery;

/// Data layer: catalogue types, loading, filtering, sampling and writing.
///
/// Architecture:
/// ```text
///   AudioMoth .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse rows → Catalogue (typed fields + raw row)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  duration / file size / excluded device predicates
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ sampler  │  per device: require 24 hours, draw one row per hour
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  writer  │  raw rows → .csv (atomic rename)
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod sampler;
pub mod synthetic;
pub mod writer;

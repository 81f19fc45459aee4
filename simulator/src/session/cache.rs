use finatlas::prelude::*;

use super::state::Module;

/// The generated case of one module. The venture exercise has no stored
/// case; its runs are seeded from the fund inputs.
#[derive(Clone, Debug, PartialEq)]
pub enum ModuleCase {
    Dcf(DcfCase),
    Lbo(LboCase),
    Merger(MergerCase),
    HedgeFund(HedgeFundUniverse),
    Venture,
}

impl ModuleCase {
    pub fn generate(module: Module, seed: &str) -> ModuleCase {
        match module {
            Module::Dcf => ModuleCase::Dcf(DcfCase::generate(seed)),
            Module::Lbo => ModuleCase::Lbo(LboCase::generate(seed)),
            Module::Merger => ModuleCase::Merger(MergerCase::generate(seed)),
            Module::HedgeFund => ModuleCase::HedgeFund(HedgeFundUniverse::generate(seed)),
            Module::Venture => ModuleCase::Venture,
        }
    }
}

/// # CaseCache
/// Holds the case of the current `(module, seed)` selection. A case is
/// generated the first time it is asked for and reused until either key
/// changes, so moving sliders never regenerates it.
///
/// ## Example
/// ```
/// use simulator::prelude::*;
/// let mut cache = CaseCache::default();
/// cache.get(Module::Dcf, "1001");
/// cache.get(Module::Dcf, "1001");
/// assert_eq!(cache.generations(), 1);
/// cache.get(Module::Lbo, "1001");
/// assert_eq!(cache.generations(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CaseCache {
    key: Option<(Module, String)>,
    case: Option<ModuleCase>,
    generations: usize,
}

impl CaseCache {
    pub fn get(&mut self, module: Module, seed: &str) -> &ModuleCase {
        let current = matches!(&self.key, Some((m, s)) if *m == module && s == seed);
        if !current {
            self.key = Some((module, seed.to_string()));
            self.case = None;
        }
        let generations = &mut self.generations;
        self.case.get_or_insert_with(|| {
            *generations += 1;
            tracing::debug!(%module, seed, "case cache miss");
            ModuleCase::generate(module, seed)
        })
    }

    /// Number of cases generated so far.
    pub fn generations(&self) -> usize {
        self.generations
    }
}

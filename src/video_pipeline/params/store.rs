use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::video_pipeline::params::types::{ColorParameters, Parameter, TableKind};
use crate::video_pipeline::tables::{ChromaTable, LumaTable};

/// Tables in effect for one frame.
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    pub luma: Arc<LumaTable>,
    pub chroma: Arc<ChromaTable>,
}

/// Owns the colour control levels and the lookup tables derived from them.
///
/// Setters may be called from a UI thread while a frame is being
/// transformed. Each rebuild produces a fresh table and publishes it with a
/// single `Arc` swap, so a frame keeps whatever tables it snapshotted.
pub struct ParameterStore {
    levels: Mutex<ColorParameters>,
    luma: RwLock<Arc<LumaTable>>,
    chroma: RwLock<Arc<ChromaTable>>,
}

impl ParameterStore {
    pub fn new(levels: ColorParameters) -> Self {
        Self {
            luma: RwLock::new(Arc::new(build_luma(&levels))),
            chroma: RwLock::new(Arc::new(build_chroma(&levels))),
            levels: Mutex::new(levels),
        }
    }

    pub fn parameters(&self) -> ColorParameters {
        *self.levels.lock()
    }

    pub fn get(&self, parameter: Parameter) -> u8 {
        self.levels.lock().get(parameter)
    }

    /// Store `level` and rebuild the table it feeds before returning.
    pub fn set(&self, parameter: Parameter, level: u8) {
        // Held across the rebuild so concurrent setters publish in order.
        let mut levels = self.levels.lock();
        levels.set(parameter, level);
        debug!(parameter = parameter.name(), level, "Colour control changed");
        self.rebuild(parameter.table(), &levels);
    }

    /// Restore every control to its default and rebuild both tables.
    pub fn reset(&self) {
        let mut levels = self.levels.lock();
        *levels = ColorParameters::default();
        self.rebuild(TableKind::Luma, &levels);
        self.rebuild(TableKind::Chroma, &levels);
    }

    pub fn tables(&self) -> TableSnapshot {
        TableSnapshot {
            luma: Arc::clone(&*self.luma.read()),
            chroma: Arc::clone(&*self.chroma.read()),
        }
    }

    pub fn brightness(&self) -> u8 {
        self.get(Parameter::Brightness)
    }

    pub fn set_brightness(&self, level: u8) {
        self.set(Parameter::Brightness, level);
    }

    pub fn contrast(&self) -> u8 {
        self.get(Parameter::Contrast)
    }

    pub fn set_contrast(&self, level: u8) {
        self.set(Parameter::Contrast, level);
    }

    pub fn hue(&self) -> u8 {
        self.get(Parameter::Hue)
    }

    pub fn set_hue(&self, level: u8) {
        self.set(Parameter::Hue, level);
    }

    pub fn saturation(&self) -> u8 {
        self.get(Parameter::Saturation)
    }

    pub fn set_saturation(&self, level: u8) {
        self.set(Parameter::Saturation, level);
    }

    pub fn gamma(&self) -> u8 {
        self.get(Parameter::Gamma)
    }

    pub fn set_gamma(&self, level: u8) {
        self.set(Parameter::Gamma, level);
    }

    fn rebuild(&self, kind: TableKind, levels: &ColorParameters) {
        match kind {
            TableKind::Luma => {
                let table = Arc::new(build_luma(levels));
                *self.luma.write() = table;
            }
            TableKind::Chroma => {
                let table = Arc::new(build_chroma(levels));
                *self.chroma.write() = table;
            }
        }
        debug!(table = ?kind, "Lookup table rebuilt");
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(ColorParameters::default())
    }
}

impl std::fmt::Debug for ParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterStore")
            .field("levels", &self.parameters())
            .finish_non_exhaustive()
    }
}

fn build_luma(levels: &ColorParameters) -> LumaTable {
    LumaTable::build(levels.brightness, levels.contrast, levels.gamma)
}

fn build_chroma(levels: &ColorParameters) -> ChromaTable {
    ChromaTable::build(levels.hue, levels.saturation)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::video_pipeline::params::{ColorParameters, Parameter, ParameterStore, TableKind};
    use crate::video_pipeline::tables::{ChromaTable, LumaTable};

    #[test]
    fn test_defaults() {
        let store = ParameterStore::default();

        for parameter in Parameter::ALL {
            assert_eq!(store.get(parameter), Parameter::DEFAULT);
        }
        assert_eq!(store.parameters(), ColorParameters::default());
        assert_eq!(*store.tables().luma, LumaTable::build(127, 127, 127));
    }

    #[test]
    fn test_named_accessors() {
        let store = ParameterStore::default();

        store.set_brightness(10);
        store.set_contrast(20);
        store.set_hue(30);
        store.set_saturation(40);
        store.set_gamma(50);

        assert_eq!(store.brightness(), 10);
        assert_eq!(store.contrast(), 20);
        assert_eq!(store.hue(), 30);
        assert_eq!(store.saturation(), 40);
        assert_eq!(store.gamma(), 50);
    }

    #[test]
    fn test_parameters_route_to_their_table() {
        assert_eq!(Parameter::Brightness.table(), TableKind::Luma);
        assert_eq!(Parameter::Contrast.table(), TableKind::Luma);
        assert_eq!(Parameter::Gamma.table(), TableKind::Luma);
        assert_eq!(Parameter::Hue.table(), TableKind::Chroma);
        assert_eq!(Parameter::Saturation.table(), TableKind::Chroma);
    }

    #[test]
    fn test_luma_setter_rebuilds_only_luma() {
        let store = ParameterStore::default();
        let before = store.tables();

        store.set_brightness(200);
        let after = store.tables();

        assert!(!Arc::ptr_eq(&before.luma, &after.luma));
        assert!(Arc::ptr_eq(&before.chroma, &after.chroma));
        assert_eq!(*after.luma, LumaTable::build(200, 127, 127));
        assert_eq!(*before.luma, LumaTable::build(127, 127, 127));
    }

    #[test]
    fn test_chroma_setter_rebuilds_only_chroma() {
        let store = ParameterStore::default();
        let before = store.tables();

        store.set_saturation(0);
        let after = store.tables();

        assert!(Arc::ptr_eq(&before.luma, &after.luma));
        assert!(!Arc::ptr_eq(&before.chroma, &after.chroma));
        assert_eq!(*after.chroma, ChromaTable::build(127, 0));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let store = ParameterStore::new(ColorParameters {
            brightness: 1,
            contrast: 2,
            hue: 3,
            saturation: 4,
            gamma: 5,
        });

        store.reset();

        assert_eq!(store.parameters(), ColorParameters::default());
        assert_eq!(*store.tables().luma, LumaTable::default());
        assert_eq!(*store.tables().chroma, ChromaTable::default());
    }

    #[test]
    fn test_concurrent_setters_leave_consistent_tables() {
        let store = Arc::new(ParameterStore::default());

        std::thread::scope(|scope| {
            let writer = Arc::clone(&store);
            scope.spawn(move || {
                for level in (0..=255u8).step_by(15) {
                    writer.set_gamma(level);
                    writer.set_hue(255 - level);
                }
            });

            for _ in 0..50 {
                let snapshot = store.tables();
                assert_eq!(snapshot.luma.lookup(255), 255);
                assert_eq!(snapshot.chroma.u_plane().len(), 256 * 256);
            }
        });

        let levels = store.parameters();
        let tables = store.tables();
        assert_eq!(*tables.luma, LumaTable::build(levels.brightness, levels.contrast, levels.gamma));
        assert_eq!(*tables.chroma, ChromaTable::build(levels.hue, levels.saturation));
    }
}

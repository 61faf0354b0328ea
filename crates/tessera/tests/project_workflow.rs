use tessera::prelude::*;
use tessera::ProjectError;
use uuid::Uuid;

fn write_definitions(dir: &std::path::Path) -> (Uuid, Uuid) {
    let sheet = Uuid::new_v4();
    let grass = TileDefinition::new("Grass", PatternKind::AutoTile)
        .with_variant(
            PatternCategory::AutoTile(AutoTileCategory::Center),
            TextureRef::new(sheet, 5),
            1.0,
        )
        .unwrap();
    let wall = TileDefinition::new("Wall", PatternKind::AutoWall)
        .with_variant(
            PatternCategory::AutoWall(AutoWallCategory::Solo),
            TextureRef::new(sheet, 9),
            1.0,
        )
        .unwrap();
    let ids = (grass.id, wall.id);

    std::fs::create_dir_all(dir).unwrap();
    let mut library = TileLibrary::new();
    library.insert(grass);
    library.insert(wall);
    library
        .save_definition(ids.0, &dir.join("grass.tile.json"))
        .unwrap();
    library
        .save_definition(ids.1, &dir.join("wall.tile.json"))
        .unwrap();
    ids
}

#[test]
fn project_paints_saves_and_reloads_a_map() {
    let root = tempfile::tempdir().unwrap();
    let (grass_id, wall_id) = write_definitions(&root.path().join("defs"));

    let project_file = root.path().join("world.toml");
    std::fs::write(
        &project_file,
        r#"
name = "World"
definitions_dir = "defs"

[grid]
tile_size = 32.0

[grid.variant_selection]
mode = "weighted"
seed = 3
"#,
    )
    .unwrap();

    let project = TileProject::load(&project_file).unwrap();
    let library = project.open_library().unwrap();
    assert_eq!(library.len(), 2);
    let grass = library.resolve(grass_id).unwrap();
    let wall = library.resolve(wall_id).unwrap();

    let mut grid = project.new_grid("Level1");
    grid.fill_rect(grass, GridCoord::new(0, 0), GridCoord::new(2, 2), &library);
    grid.set_tile(wall, GridCoord::new(10, 10), &library);

    let center = grid.try_get_tile(GridCoord::new(1, 1)).unwrap();
    assert_eq!(center.texture.map(|t| t.frame), Some(5));

    let path = project.save_map(&grid).unwrap();
    assert!(path.ends_with("maps/Level1.tilemap"));

    let loaded = project.load_map("Level1", &library).unwrap();
    assert_eq!(loaded.selection(), VariantSelection::Weighted { seed: 3 });
    assert_eq!(loaded.ref_count(grass_id), 9);
    assert_eq!(loaded.ref_count(wall_id), 1);
    for (coord, placed) in grid.iter() {
        assert_eq!(loaded.try_get_tile(coord), Some(placed));
    }
}

#[test]
fn loading_with_missing_definitions_fails() {
    let root = tempfile::tempdir().unwrap();
    let (grass_id, _) = write_definitions(&root.path().join("tiles"));

    let mut project = TileProject::new("Broken");
    project.save(&root.path().join("broken.toml")).unwrap();
    let library = project.open_library().unwrap();
    let grass = library.resolve(grass_id).unwrap();

    let mut grid = project.new_grid("Only");
    grid.set_tile(grass, GridCoord::new(0, 0), &library);
    project.save_map(&grid).unwrap();

    let err = project.load_map("Only", &TileLibrary::new()).unwrap_err();
    match err {
        ProjectError::LoadMap { name, source } => {
            assert_eq!(name, "Only");
            assert!(matches!(source, MapLoadError::UnresolvedTile(id) if id == grass_id));
        }
        other => panic!("expected map load failure, got {other:?}"),
    }
}

#[test]
fn render_feed_uses_project_tile_size() {
    struct Frames;

    impl TextureProvider for Frames {
        type Handle = u32;

        fn resolve(&self, texture: &TextureRef) -> Option<u32> {
            Some(texture.frame)
        }
    }

    let root = tempfile::tempdir().unwrap();
    let (_, wall_id) = write_definitions(&root.path().join("tiles"));
    let mut project = TileProject::new("Draw");
    project.grid.tile_size = 8.0;
    project.save(&root.path().join("draw.toml")).unwrap();
    let library = project.open_library().unwrap();

    let mut grid = project.new_grid("Walls");
    grid.set_tile(library.resolve(wall_id).unwrap(), GridCoord::new(2, 3), &library);

    let mut drawn = Vec::new();
    let mut renderer = |t: TileTransform, frame: &u32| drawn.push((t.translation, *frame));
    let stats = render_grid(&grid, &Frames, &mut renderer, project.grid.tile_size, None);

    assert_eq!(stats.drawn, 1);
    assert_eq!(drawn, vec![([16.0, -24.0], 9)]);
}

#[test]
fn map_names_stay_inside_the_maps_folder() {
    let root = tempfile::tempdir().unwrap();
    let project_dir = root.path().join("game");
    std::fs::create_dir_all(&project_dir).unwrap();
    let mut project = TileProject::new("Escape");
    project.save(&project_dir.join("escape.toml")).unwrap();

    let err = project.save_map(&project.new_grid("../escaped")).unwrap_err();
    assert!(matches!(err, ProjectError::InvalidMapName(ref name) if name == "../escaped"));
    assert!(!project_dir.join("escaped.tilemap").exists());
    assert!(!root.path().join("escaped.tilemap").exists());

    let library = TileLibrary::new();
    for name in ["../escaped", "sub/level", "sub\\level", ""] {
        let err = project.load_map(name, &library).unwrap_err();
        assert!(matches!(err, ProjectError::InvalidMapName(_)), "{name:?} was accepted");
    }

    let path = project.save_map(&project.new_grid("Inside")).unwrap();
    assert_eq!(path, project_dir.join("maps").join("Inside.tilemap"));
}

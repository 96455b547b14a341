// ============================================
// PaperMap CLI - Создание и проверка карт без GUI
// ============================================

use std::path::Path;
use std::process::ExitCode;

use papermap::editor::core::PATH_TEXTURES;
use papermap::{EditorConfig, Map, MapFiles, MapProperties, Result};

const USAGE: &str = "usage:\n  papermap new <project> [id]\n  papermap info <project> <id>";

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["new", project] => new_map(Path::new(project), None),
        ["new", project, id] => match id.parse() {
            Ok(id) => new_map(Path::new(project), Some(id)),
            Err(_) => return usage(),
        },
        ["info", project, id] => match id.parse() {
            Ok(id) => info(Path::new(project), id),
            Err(_) => return usage(),
        },
        _ => return usage(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn usage() -> ExitCode {
    eprintln!("{}", USAGE);
    ExitCode::from(2)
}

fn config(project: &Path) -> Result<EditorConfig> {
    EditorConfig::load(project.join("editor.json"))
}

/// Карта по умолчанию (id 1) или пустая карта с заданным id
fn new_map(project: &Path, id: Option<i32>) -> Result<()> {
    let config = config(project)?;
    let files = match id {
        None => MapFiles::write_default_map(project, config.portion_size)?,
        Some(id) => {
            let properties = MapProperties {
                id,
                name: MapFiles::map_name(id),
                ..MapProperties::default()
            };
            MapFiles::write_new_map(project, &properties, config.portion_size)?
        }
    };
    println!("{}", files.path().display());
    Ok(())
}

/// Открыть карту, загрузить окно вокруг начала координат
fn info(project: &Path, id: i32) -> Result<()> {
    let mut map = Map::open(project, id, config(project)?, false)?;
    map.load_textures(&project.join(PATH_TEXTURES));
    map.load_portions();

    let grid = map.grid();
    let visible = grid.iter().filter(|(_, p)| p.is_visible()).count();
    let quads: u32 = grid
        .iter()
        .map(|(_, p)| p.mesh_floors().quad_count() + p.mesh_sprites_static().quad_count() + p.mesh_sprites_face().quad_count())
        .sum();

    let properties = map.properties();
    println!("{} \"{}\"", properties.real_name(), properties.name);
    println!("size: {}x{}x{} (depth {})", properties.length, properties.width, properties.height, properties.depth);
    println!("portions: {} loaded, {} visible", grid.loaded_count(), visible);
    println!("quads: {}", quads);
    println!("tileset: {}x{}", map.textures().tileset.width, map.textures().tileset.height);
    for object in map.objects().user_objects() {
        println!("  {}", object);
    }
    Ok(())
}

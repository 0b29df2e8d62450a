// mediadur-core/tests/discovery_tests.rs

use mediadur_core::discovery::{InputPaths, discover_media_files, discover_media_files_with};
use std::fs::{self, File};
use std::path::PathBuf;
use tempfile::tempdir;

fn sorted(files: impl Iterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = files.collect();
    files.sort();
    files
}

#[test]
fn test_single_media_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let clip = dir.path().join("clip.mov");
    File::create(&clip)?;

    let files: Vec<PathBuf> = discover_media_files(clip.clone(), false, false).collect();
    assert_eq!(files, vec![clip]);

    dir.close()?;
    Ok(())
}

#[test]
fn test_non_media_file_needs_allow_all() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let notes = dir.path().join("notes.txt");
    File::create(&notes)?;

    assert_eq!(discover_media_files(notes.clone(), false, false).count(), 0);

    let files: Vec<PathBuf> = discover_media_files(notes.clone(), true, false).collect();
    assert_eq!(files, vec![notes]);

    dir.close()?;
    Ok(())
}

#[test]
fn test_directory_depth() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let root = dir.path();

    File::create(root.join("video1.mkv"))?;
    File::create(root.join("video2.MOV"))?; // case insensitive
    File::create(root.join("document.txt"))?;
    fs::create_dir_all(root.join("day1").join("cam_a"))?;
    File::create(root.join("day1").join("nested.mp4"))?;
    File::create(root.join("day1").join("cam_a").join("deep.mxf"))?;

    let shallow = sorted(discover_media_files(root, false, false));
    assert_eq!(
        shallow,
        vec![root.join("video1.mkv"), root.join("video2.MOV")]
    );

    let deep = sorted(discover_media_files(root, false, true));
    assert_eq!(
        deep,
        vec![
            root.join("day1").join("cam_a").join("deep.mxf"),
            root.join("day1").join("nested.mp4"),
            root.join("video1.mkv"),
            root.join("video2.MOV"),
        ]
    );

    // directories themselves are never yielded
    let everything = sorted(discover_media_files(root, true, true));
    assert_eq!(everything.len(), 5);
    assert!(everything.iter().all(|p| p.is_file()));

    dir.close()?;
    Ok(())
}

#[test]
fn test_missing_path_yields_nothing() {
    let missing = PathBuf::from("surely_this_does_not_exist_42_integration");
    assert_eq!(discover_media_files(missing, true, true).count(), 0);
}

#[test]
fn test_multiple_inputs_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let a = dir.path().join("a.mp4");
    let b = dir.path().join("b.mov");
    File::create(&a)?;
    File::create(&b)?;

    let inputs = InputPaths::List(vec![b.clone(), dir.path().join("missing.mov"), a.clone()]);
    let files: Vec<PathBuf> = discover_media_files(inputs, false, false).collect();
    assert_eq!(files, vec![b, a]);

    dir.close()?;
    Ok(())
}

#[test]
fn test_custom_extension_list() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("a.mov"))?;
    File::create(dir.path().join("b.r3d"))?;

    let files: Vec<PathBuf> =
        discover_media_files_with(dir.path(), vec!["r3d".to_string()], false, false).collect();
    assert_eq!(files, vec![dir.path().join("b.r3d")]);

    dir.close()?;
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    let root = dir.path();
    let sibling = root.join("a_sibling.mov");
    let locked = root.join("locked");
    File::create(&sibling)?;
    fs::create_dir(&locked)?;
    File::create(locked.join("hidden.mov"))?;
    File::create(root.join("z_after.mp4"))?;

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;
    // root ignores directory permissions, so there is nothing to check
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let files = sorted(discover_media_files(root, false, true));
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

    assert_eq!(files, vec![sibling, root.join("z_after.mp4")]);

    dir.close()?;
    Ok(())
}

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use common::config::DashboardEnv;

fn main() {
    println!("cargo:rerun-if-changed=../frontend/dist");
    println!("cargo:rerun-if-env-changed=BUILD_OUTPUT_DIR");

    let dist_dir = Path::new("../frontend/dist");
    if !dist_dir.exists() {
        return;
    }

    let dashboard = match DashboardEnv::from_env() {
        Ok(dashboard) => dashboard,
        Err(e) => panic!("invalid dashboard environment: {e}"),
    };
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    let out_dir = manifest_dir.join(dashboard.build_output_dir());

    if !DashboardEnv::may_replace_output_dir(&out_dir, &manifest_dir) {
        panic!(
            "refusing to clear {}: it is outside the crate and holds no dashboard build",
            out_dir.display()
        );
    }
    let _ = fs::remove_dir_all(&out_dir);
    fs::create_dir_all(&out_dir).unwrap();
    fs_extra::dir::copy(
        dist_dir,
        &out_dir,
        &fs_extra::dir::CopyOptions::new().overwrite(true).content_only(true),
    )
        .unwrap();
}

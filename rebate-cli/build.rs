use std::process::Command;

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo_root = format!("{}/..", manifest_dir);

    let sha = Command::new("git")
        .args(["-C", &repo_root, "rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=REBATE_BUILD_SHA={}", sha);
    // HEAD moves on checkout; the branch ref moves on commit.
    let git_dir = format!("{}/.git", repo_root);
    println!("cargo:rerun-if-changed={}/HEAD", git_dir);
    if let Ok(head) = std::fs::read_to_string(format!("{}/HEAD", git_dir)) {
        if let Some(branch_ref) = head.trim().strip_prefix("ref: ") {
            println!("cargo:rerun-if-changed={}/{}", git_dir, branch_ref);
        }
    }
}

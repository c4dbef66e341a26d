fn main() {
    #[cfg(target_os = "windows")]
    {
        // Station PCs run Windows; embed the analyzer icon when present.
        if std::path::Path::new("assets/icon.ico").exists() {
            let mut res = winres::WindowsResource::new();
            res.set_icon("assets/icon.ico");
            res.compile().expect("Failed to compile Windows resources");
        }
    }
}

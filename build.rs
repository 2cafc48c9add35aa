fn main() {
    // Only compile Windows resources on Windows target
    #[cfg(target_os = "windows")]
    {
        // Version info and the application manifest (per-monitor DPI awareness)
        let _ = embed_resource::compile("resources/windows/resources.rc", embed_resource::NONE);
    }
}

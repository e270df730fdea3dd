/// Directory di lavoro lato client: SFTP non ha un `cwd` di sessione
pub struct PathResolver {
    cwd: String,
}

impl PathResolver {
    pub fn new(cwd: String) -> Self {
        Self { cwd }
    }

    /// Joins `path` onto the working directory unless it is already absolute,
    /// folding `.` and `..` segments. `..` never climbs above `/`.
    pub fn resolve(&self, path: &str) -> String {
        let joined = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("{}/{}", self.cwd.trim_end_matches('/'), path)
        };

        let mut segments: Vec<&str> = Vec::new();
        for segment in joined.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s => segments.push(s),
            }
        }

        format!("/{}", segments.join("/"))
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn set_cwd(&mut self, cwd: String) {
        self.cwd = cwd;
    }
}

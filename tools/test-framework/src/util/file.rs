/*!
   Filesystem utilities.
*/

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::Error;

/**
   Write the given content to a file in append mode, creating the file
   and its parent directories if needed.

   This is used to save the log output of containers to log files
   before the containers are removed.
*/
pub fn append_to_file(file_path: &Path, content: &[u8]) -> Result<(), Error> {
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(file_path)?;

    file.write_all(content)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::random::random_string;

    #[test]
    fn appends_and_creates_parents() -> Result<(), Error> {
        let dir = std::env::temp_dir().join(format!("file-test-{}", random_string()));
        let path = dir.join("logs").join("node.log");

        append_to_file(&path, b"first\n")?;
        append_to_file(&path, b"second\n")?;

        assert_eq!(fs::read_to_string(&path)?, "first\nsecond\n");

        fs::remove_dir_all(dir)?;
        Ok(())
    }
}

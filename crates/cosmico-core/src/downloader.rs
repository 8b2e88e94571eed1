//! Recording downloader: one sequential GET per recording.
//!
//! The body is streamed into `<name>.mp4.part` and renamed once complete, so
//! an interrupted run never leaves a file that looks finished.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpOptions};
use crate::naming;

/// Abort when fewer than this many bytes/s arrive for [`LOW_SPEED_TIME`].
const LOW_SPEED_LIMIT: u32 = 1024;
const LOW_SPEED_TIME: Duration = Duration::from_secs(60);

/// Snapshot passed to the progress callback.
#[derive(Debug, Clone, Copy)]
pub struct DownloadProgress {
    pub bytes_done: u64,
    /// Known once the server sends `Content-Length`.
    pub total_bytes: Option<u64>,
    pub elapsed_secs: f64,
}

impl DownloadProgress {
    pub fn fraction(&self) -> Option<f64> {
        match self.total_bytes {
            Some(total) if total > 0 => Some(self.bytes_done as f64 / total as f64),
            _ => None,
        }
    }

    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs > 0.0 {
            self.bytes_done as f64 / self.elapsed_secs
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded { path: PathBuf, bytes: u64 },
    /// A file of the remote size already exists.
    AlreadyPresent { path: PathBuf },
}

pub struct VodDownloader {
    options: HttpOptions,
    output_dir: PathBuf,
}

impl VodDownloader {
    /// Downloads go to `output_dir`, created on first use.
    pub fn new(options: HttpOptions, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            options,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Destination file for a webinar title.
    pub fn target_path(&self, title: &str) -> PathBuf {
        self.output_dir.join(naming::video_filename(title))
    }

    /// Save the recording at `url` under a name derived from `title`.
    pub fn download(
        &self,
        title: &str,
        url: &str,
        mut on_progress: impl FnMut(&DownloadProgress),
    ) -> Result<DownloadOutcome> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.target_path(title);
        let local_len = fs::metadata(&path).ok().map(|m| m.len());

        if let Some(local) = local_len {
            match self.remote_size(url) {
                Some(size) if size == local => {
                    tracing::info!(path = %path.display(), "already downloaded");
                    return Ok(DownloadOutcome::AlreadyPresent { path });
                }
                remote => {
                    tracing::debug!(
                        path = %path.display(),
                        local,
                        ?remote,
                        "size unknown or different, checking the GET response"
                    );
                }
            }
        }

        let part = part_path(&path);
        match self.fetch_to(url, &part, local_len, &mut on_progress) {
            Ok(Fetched::Complete(bytes)) => {
                fs::rename(&part, &path)?;
                tracing::info!(path = %path.display(), bytes, "downloaded");
                Ok(DownloadOutcome::Downloaded { path, bytes })
            }
            Ok(Fetched::MatchesLocal) => {
                let _ = fs::remove_file(&part);
                tracing::info!(path = %path.display(), "already downloaded");
                Ok(DownloadOutcome::AlreadyPresent { path })
            }
            Err(e) => {
                let _ = fs::remove_file(&part);
                Err(e)
            }
        }
    }

    /// `Content-Length` from a HEAD request; `None` when the server won't say
    /// (signed CDN links often refuse HEAD).
    fn remote_size(&self, url: &str) -> Option<u64> {
        let mut http = HttpClient::new(self.options.clone());
        match http.head(url).and_then(|r| r.error_for_status()) {
            Ok(resp) => resp.head.content_length,
            Err(e) => {
                tracing::debug!(url, error = %e, "HEAD failed");
                None
            }
        }
    }

    fn fetch_to(
        &self,
        url: &str,
        dest: &Path,
        local_len: Option<u64>,
        on_progress: &mut dyn FnMut(&DownloadProgress),
    ) -> Result<Fetched> {
        let mut file = File::create(dest)?;
        let mut written: u64 = 0;
        let mut write_err: Option<io::Error> = None;
        let mut headers: Vec<String> = Vec::new();
        let mut matches_local = false;
        let started = Instant::now();

        let mut easy = curl::easy::Easy::new();
        self.options.configure(&mut easy)?;
        // 0 disables the overall limit; stalls are caught by the low-speed check.
        easy.timeout(Duration::ZERO)?;
        easy.low_speed_limit(LOW_SPEED_LIMIT)?;
        easy.low_speed_time(LOW_SPEED_TIME)?;
        easy.url(url)?;
        easy.progress(true)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                let Ok(s) = str::from_utf8(data) else {
                    return true;
                };
                let line = s.trim_end();
                // A blank line closes a header block; stop before any body
                // byte when the final response matches the local file.
                if line.is_empty() && local_len.is_some() {
                    let head = crate::http::parse_headers(&headers);
                    if head.status.is_some_and(|st| (200..300).contains(&st))
                        && head.content_length == local_len
                    {
                        matches_local = true;
                        return false;
                    }
                }
                headers.push(line.to_string());
                true
            })?;
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.progress_function(|dl_total, dl_now, _, _| {
                on_progress(&DownloadProgress {
                    bytes_done: dl_now as u64,
                    total_bytes: (dl_total > 0.0).then_some(dl_total as u64),
                    elapsed_secs: started.elapsed().as_secs_f64(),
                });
                true
            })?;
            transfer.perform()
        };

        if matches_local {
            return Ok(Fetched::MatchesLocal);
        }
        if let Some(e) = write_err {
            return Err(Error::Io(e));
        }
        performed?;

        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            return Err(Error::Http {
                url: url.to_string(),
                status,
            });
        }
        file.flush()?;

        let expected = crate::http::parse_headers(&headers).content_length;
        if let Some(exp) = expected {
            if written != exp {
                return Err(Error::parse(format!(
                    "partial transfer: wrote {written} of {exp} bytes"
                )));
            }
        }
        Ok(Fetched::Complete(written))
    }
}

enum Fetched {
    Complete(u64),
    /// The GET announced the local file's size; nothing was written.
    MatchesLocal,
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

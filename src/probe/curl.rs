use crate::command::CommandRunner;
use crate::probe::Prober;

/// Probes with `curl`, discarding the body and printing only the status
pub struct CurlProber<'a, R> {
    runner: &'a R,
    curl_path: String,
}

impl<'a, R: CommandRunner> CurlProber<'a, R> {
    pub fn new(runner: &'a R, curl_path: impl Into<String>) -> Self {
        Self {
            runner,
            curl_path: curl_path.into(),
        }
    }

    /// Arguments for a silent, body-less status probe
    pub fn probe_args(url: &str) -> Vec<String> {
        vec![
            "-o".to_string(),
            "/dev/null".to_string(),
            "-s".to_string(),
            "-w".to_string(),
            "%{http_code}".to_string(),
            url.to_string(),
        ]
    }
}

impl<R: CommandRunner + Sync> Prober for CurlProber<'_, R> {
    async fn status(&self, url: &str) -> Option<u16> {
        let output = match self.runner.run(&self.curl_path, &Self::probe_args(url)).await {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("Status probe could not run: {}", e);
                return None;
            }
        };

        if !output.success() {
            tracing::debug!("Status probe for {} exited with {:?}", url, output.code);
            return None;
        }

        output.stdout.trim().parse::<u16>().ok()
    }
}

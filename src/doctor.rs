use crate::engine::Converter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    pub executable: String,
    pub found: bool,
    pub message: String,
}

pub fn diagnose(converter: &dyn Converter) -> Diagnosis {
    let executable = converter.program().display().to_string();
    let found = converter.is_installed();
    let message = if found {
        format!("✅ pdf2html found at: {executable}")
    } else {
        install_hint(&executable)
    };
    Diagnosis {
        executable,
        found,
        message,
    }
}

fn install_hint(executable: &str) -> String {
    let dir = std::path::Path::new(executable)
        .parent()
        .map(|p| p.display().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ".".to_string());
    format!(
        "❌ pdf2html not found at {executable}. Install with:\n\n\
```bash\n\
sudo mkdir -p {dir}\n\
sudo cp pdf2html {dir}/\n\
sudo chmod +x {executable}\n\
```\n\n\
Check system-wide PATH:\n\
```bash\n\
export PATH=\"{dir}:$PATH\"\n\
```\n"
    )
}

pub fn deploy_instructions() -> &'static str {
    "# 🚀 Deploy to Vercel

## Prerequisites
```bash
npm install -g vercel
```

## Quick Deploy
```bash
vercel --prod
```

## Access Your Site
```bash
vercel ls
```

Your site will be live at: https://your-project.vercel.app
"
}

mod registry;
mod types;

pub use registry::{DocumentRegistry, RegistryError};
pub use types::{
    AckResponse, DocumentListResponse, DocumentResponse, ErrorResponse, FetchRequest,
    FileResponse, ListRequest, PortalAction, RemoveRequest, UploadRequest, VerifyRequest,
};

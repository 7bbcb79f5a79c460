use classy_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError};
use classy_weather::WeatherError as LookupError;

/// Converts lookup failures into the application error hierarchy.
pub trait LookupErrorExt {
    fn into_app_error(self) -> AppError;
}

impl LookupErrorExt for LookupError {
    fn into_app_error(self) -> AppError {
        match self {
            LookupError::NotFound(query) => AppError::Weather(WeatherError::LocationNotFound(query)),
            LookupError::Cancelled => AppError::Weather(WeatherError::Cancelled),
            LookupError::Network(e) => AppError::Network(e.into_network_error()),
            LookupError::Status { status, body } => AppError::Network(NetworkError::ServerError {
                status,
                message: body,
            }),
            LookupError::Parse(msg) => AppError::Network(NetworkError::InvalidResponse(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_location_not_found() {
        let err = LookupError::NotFound("Xyzzyplace123".into()).into_app_error();
        assert!(matches!(
            err,
            AppError::Weather(WeatherError::LocationNotFound(ref q)) if q == "Xyzzyplace123"
        ));
    }

    #[test]
    fn cancelled_stays_cancelled() {
        assert!(LookupError::Cancelled.into_app_error().is_cancelled());
    }

    #[test]
    fn status_maps_to_server_error() {
        let err = LookupError::Status {
            status: 503,
            body: "down".into(),
        }
        .into_app_error();
        assert!(matches!(
            err,
            AppError::Network(NetworkError::ServerError { status: 503, .. })
        ));
    }

    #[test]
    fn parse_maps_to_invalid_response() {
        let err = LookupError::Parse("bad json".into()).into_app_error();
        assert!(matches!(
            err,
            AppError::Network(NetworkError::InvalidResponse(_))
        ));
    }
}

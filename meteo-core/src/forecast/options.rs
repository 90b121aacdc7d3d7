//! Enumerated option values accepted by the forecast endpoint.

use serde::{Deserialize, Serialize};

/// Declares a closed set of wire tokens as an enum with `as_str`, `all`,
/// `Display` and `TryFrom<&str>`.
macro_rules! token_enum {
    ($(#[$meta:meta])* $name:ident, $what:literal { $($variant:ident => $token:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token, )+
                }
            }

            pub const fn all() -> &'static [$name] {
                &[$( $name::$variant, )+]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<&str> for $name {
            type Error = anyhow::Error;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                match value.trim() {
                    $( $token => Ok($name::$variant), )+
                    _ => Err(anyhow::anyhow!(
                        "Unknown {} '{value}'. Supported values: {}.",
                        $what,
                        $name::all().iter().map($name::as_str).collect::<Vec<_>>().join(", ")
                    )),
                }
            }
        }
    };
}

token_enum! {
    /// Variables that can be requested as hourly series.
    HourlyVariable, "hourly variable" {
        Temperature2m => "temperature_2m",
        RelativeHumidity2m => "relativehumidity_2m",
        Dewpoint2m => "dewpoint_2m",
        ApparentTemperature => "apparent_temperature",
        PressureMsl => "pressure_msl",
        SurfacePressure => "surface_pressure",
        CloudCover => "cloudcover",
        CloudCoverLow => "cloudcover_low",
        CloudCoverMid => "cloudcover_mid",
        CloudCoverHigh => "cloudcover_high",
        WindSpeed10m => "windspeed_10m",
        WindSpeed80m => "windspeed_80m",
        WindSpeed120m => "windspeed_120m",
        WindSpeed180m => "windspeed_180m",
        WindDirection10m => "winddirection_10m",
        WindDirection80m => "winddirection_80m",
        WindDirection120m => "winddirection_120m",
        WindDirection180m => "winddirection_180m",
        WindGusts10m => "windgusts_10m",
        ShortwaveRadiation => "shortwave_radiation",
        DirectRadiation => "direct_radiation",
        DirectNormalIrradiance => "direct_normal_irradiance",
        DiffuseRadiation => "diffuse_radiation",
        VaporPressureDeficit => "vapor_pressure_deficit",
        Cape => "cape",
        Evapotranspiration => "evapotranspiration",
        Et0FaoEvapotranspiration => "et0_fao_evapotranspiration",
        Precipitation => "precipitation",
        Snowfall => "snowfall",
        Rain => "rain",
        Showers => "showers",
        WeatherCode => "weathercode",
        SnowDepth => "snow_depth",
        FreezingLevelHeight => "freezinglevel_height",
        Visibility => "visibility",
        SoilTemperature0cm => "soil_temperature_0cm",
        SoilTemperature6cm => "soil_temperature_6cm",
        SoilTemperature18cm => "soil_temperature_18cm",
        SoilTemperature54cm => "soil_temperature_54cm",
        SoilMoisture0To1cm => "soil_moisture_0_1cm",
        SoilMoisture1To3cm => "soil_moisture_1_3cm",
        SoilMoisture3To9cm => "soil_moisture_3_9cm",
        SoilMoisture9To27cm => "soil_moisture_9_27cm",
        SoilMoisture27To81cm => "soil_moisture_27_81cm",
    }
}

token_enum! {
    /// Variables that can be requested as daily aggregates.
    DailyVariable, "daily variable" {
        Temperature2mMax => "temperature_2m_max",
        Temperature2mMin => "temperature_2m_min",
        ApparentTemperatureMax => "apparent_temperature_max",
        ApparentTemperatureMin => "apparent_temperature_min",
        PrecipitationSum => "precipitation_sum",
        RainSum => "rain_sum",
        ShowersSum => "showers_sum",
        SnowfallSum => "snowfall_sum",
        PrecipitationHours => "precipitation_hours",
        WeatherCode => "weathercode",
        Sunrise => "sunrise",
        Sunset => "sunset",
        WindSpeed10mMax => "windspeed_10m_max",
        WindGusts10mMax => "windgusts_10m_max",
        WindDirection10mDominant => "winddirection_10m_dominant",
        ShortwaveRadiationSum => "shortwave_radiation_sum",
        Et0FaoEvapotranspiration => "et0_fao_evapotranspiration",
    }
}

token_enum! {
    TemperatureUnit, "temperature unit" {
        Celsius => "celsius",
        Fahrenheit => "fahrenheit",
    }
}

token_enum! {
    WindSpeedUnit, "wind speed unit" {
        Kmh => "kmh",
        Ms => "ms",
        Mph => "mph",
        Knots => "kn",
    }
}

token_enum! {
    PrecipitationUnit, "precipitation unit" {
        Millimeter => "mm",
        Inch => "inch",
    }
}

token_enum! {
    TimeFormat, "time format" {
        Iso8601 => "iso8601",
        UnixTime => "unixtime",
    }
}

token_enum! {
    /// How many days before today to include.
    PastDays, "past days value" {
        Zero => "0",
        One => "1",
        Two => "2",
    }
}

token_enum! {
    /// Grid-cell selection policy for the requested coordinates.
    CellSelection, "cell selection" {
        Land => "land",
        Sea => "sea",
        Nearest => "nearest",
    }
}

//! IANA to Windows time zone ids
//!
//! Exchange only understands Windows zone ids. The table follows the CLDR
//! `windowsZones` mapping for each territory's canonical zone.

use chrono_tz::Tz;

/// Windows zone id Exchange uses for `tz`, if one is known.
pub fn windows_zone_id(tz: Tz) -> Option<&'static str> {
    let id = match tz.name() {
        "UTC" | "Etc/UTC" | "Etc/UCT" | "Etc/Universal" | "Etc/Zulu" | "Etc/GMT" | "GMT"
        | "Universal" | "Zulu" => "UTC",

        // Europe
        "Europe/London" | "Europe/Dublin" | "Europe/Lisbon" | "Atlantic/Canary"
        | "Atlantic/Faroe" | "Atlantic/Madeira" | "Europe/Guernsey" | "Europe/Isle_of_Man"
        | "Europe/Jersey" => "GMT Standard Time",
        "Atlantic/Reykjavik" => "Greenwich Standard Time",
        "Europe/Berlin" | "Europe/Amsterdam" | "Europe/Andorra" | "Europe/Rome"
        | "Europe/Stockholm" | "Europe/Vienna" | "Europe/Zurich" | "Europe/Luxembourg"
        | "Europe/Monaco" | "Europe/Oslo" | "Europe/Malta" | "Europe/Vaduz"
        | "Europe/San_Marino" | "Europe/Vatican" | "Europe/Gibraltar" | "Europe/Busingen"
        | "Arctic/Longyearbyen" => "W. Europe Standard Time",
        "Europe/Budapest" | "Europe/Prague" | "Europe/Bratislava" | "Europe/Belgrade"
        | "Europe/Ljubljana" | "Europe/Podgorica" | "Europe/Tirane" => {
            "Central Europe Standard Time"
        }
        "Europe/Paris" | "Europe/Brussels" | "Europe/Copenhagen" | "Europe/Madrid"
        | "Africa/Ceuta" => "Romance Standard Time",
        "Europe/Warsaw" | "Europe/Sarajevo" | "Europe/Skopje" | "Europe/Zagreb" => {
            "Central European Standard Time"
        }
        "Africa/Lagos" | "Africa/Algiers" | "Africa/Tunis" => "W. Central Africa Standard Time",
        "Europe/Athens" | "Europe/Bucharest" | "Asia/Nicosia" | "Asia/Famagusta" => {
            "GTB Standard Time"
        }
        "Europe/Helsinki" | "Europe/Kiev" | "Europe/Kyiv" | "Europe/Riga" | "Europe/Sofia"
        | "Europe/Tallinn" | "Europe/Vilnius" | "Europe/Mariehamn" => "FLE Standard Time",
        "Europe/Chisinau" => "E. Europe Standard Time",
        "Europe/Kaliningrad" => "Kaliningrad Standard Time",
        "Europe/Istanbul" => "Turkey Standard Time",
        "Europe/Minsk" => "Belarus Standard Time",
        "Europe/Moscow" | "Europe/Kirov" | "Europe/Simferopol" => "Russian Standard Time",
        "Europe/Samara" | "Europe/Ulyanovsk" => "Russia Time Zone 3",

        // Africa and Middle East
        "Africa/Cairo" => "Egypt Standard Time",
        "Africa/Johannesburg" | "Africa/Maputo" | "Africa/Harare" | "Africa/Lusaka" => {
            "South Africa Standard Time"
        }
        "Africa/Nairobi" | "Africa/Addis_Ababa" | "Africa/Dar_es_Salaam" | "Africa/Kampala" => {
            "E. Africa Standard Time"
        }
        "Africa/Casablanca" => "Morocco Standard Time",
        "Africa/Abidjan" | "Africa/Accra" | "Africa/Dakar" => "Greenwich Standard Time",
        "Asia/Jerusalem" | "Asia/Tel_Aviv" => "Israel Standard Time",
        "Asia/Beirut" => "Middle East Standard Time",
        "Asia/Amman" => "Jordan Standard Time",
        "Asia/Damascus" => "Syria Standard Time",
        "Asia/Baghdad" => "Arabic Standard Time",
        "Asia/Riyadh" | "Asia/Kuwait" | "Asia/Qatar" | "Asia/Bahrain" | "Asia/Aden" => {
            "Arab Standard Time"
        }
        "Asia/Tehran" => "Iran Standard Time",
        "Asia/Dubai" | "Asia/Muscat" => "Arabian Standard Time",

        // Asia
        "Asia/Baku" => "Azerbaijan Standard Time",
        "Asia/Tbilisi" => "Georgian Standard Time",
        "Asia/Yerevan" => "Caucasus Standard Time",
        "Asia/Kabul" => "Afghanistan Standard Time",
        "Asia/Karachi" => "Pakistan Standard Time",
        "Asia/Tashkent" | "Asia/Samarkand" => "West Asia Standard Time",
        "Asia/Yekaterinburg" => "Ekaterinburg Standard Time",
        "Asia/Kolkata" | "Asia/Calcutta" => "India Standard Time",
        "Asia/Colombo" => "Sri Lanka Standard Time",
        "Asia/Kathmandu" => "Nepal Standard Time",
        "Asia/Almaty" | "Asia/Bishkek" => "Central Asia Standard Time",
        "Asia/Dhaka" => "Bangladesh Standard Time",
        "Asia/Omsk" => "Omsk Standard Time",
        "Asia/Yangon" | "Asia/Rangoon" => "Myanmar Standard Time",
        "Asia/Bangkok" | "Asia/Ho_Chi_Minh" | "Asia/Jakarta" | "Asia/Phnom_Penh"
        | "Asia/Vientiane" => "SE Asia Standard Time",
        "Asia/Novosibirsk" => "N. Central Asia Standard Time",
        "Asia/Krasnoyarsk" => "North Asia Standard Time",
        "Asia/Shanghai" | "Asia/Hong_Kong" | "Asia/Macau" => "China Standard Time",
        "Asia/Irkutsk" => "North Asia East Standard Time",
        "Asia/Singapore" | "Asia/Kuala_Lumpur" | "Asia/Manila" | "Asia/Makassar"
        | "Asia/Brunei" => "Singapore Standard Time",
        "Australia/Perth" => "W. Australia Standard Time",
        "Asia/Taipei" => "Taipei Standard Time",
        "Asia/Ulaanbaatar" => "Ulaanbaatar Standard Time",
        "Asia/Tokyo" | "Asia/Jayapura" => "Tokyo Standard Time",
        "Asia/Seoul" => "Korea Standard Time",
        "Asia/Pyongyang" => "North Korea Standard Time",
        "Asia/Yakutsk" => "Yakutsk Standard Time",
        "Asia/Vladivostok" => "Vladivostok Standard Time",
        "Asia/Magadan" => "Magadan Standard Time",
        "Asia/Kamchatka" => "Russia Time Zone 11",

        // Oceania
        "Australia/Adelaide" => "Cen. Australia Standard Time",
        "Australia/Darwin" => "AUS Central Standard Time",
        "Australia/Brisbane" => "E. Australia Standard Time",
        "Australia/Sydney" | "Australia/Melbourne" | "Australia/Canberra" => {
            "AUS Eastern Standard Time"
        }
        "Australia/Hobart" => "Tasmania Standard Time",
        "Pacific/Port_Moresby" | "Pacific/Guam" => "West Pacific Standard Time",
        "Pacific/Noumea" | "Pacific/Guadalcanal" => "Central Pacific Standard Time",
        "Pacific/Auckland" => "New Zealand Standard Time",
        "Pacific/Fiji" => "Fiji Standard Time",
        "Pacific/Tongatapu" => "Tonga Standard Time",
        "Pacific/Apia" => "Samoa Standard Time",
        "Pacific/Kiritimati" => "Line Islands Standard Time",
        "Pacific/Honolulu" => "Hawaiian Standard Time",

        // Americas
        "America/Anchorage" | "America/Juneau" | "America/Nome" | "America/Sitka" => {
            "Alaskan Standard Time"
        }
        "America/Los_Angeles" | "America/Vancouver" | "America/Tijuana" => {
            "Pacific Standard Time"
        }
        "America/Phoenix" | "America/Hermosillo" => "US Mountain Standard Time",
        "America/Denver" | "America/Boise" | "America/Edmonton" => "Mountain Standard Time",
        "America/Chicago" | "America/Winnipeg" | "America/Matamoros" => "Central Standard Time",
        "America/Mexico_City" | "America/Monterrey" | "America/Merida" => {
            "Central Standard Time (Mexico)"
        }
        "America/Regina" => "Canada Central Standard Time",
        "America/Guatemala" | "America/Costa_Rica" | "America/El_Salvador"
        | "America/Managua" | "America/Tegucigalpa" => "Central America Standard Time",
        "America/New_York" | "America/Toronto" | "America/Detroit" | "America/Montreal"
        | "America/Nassau" => "Eastern Standard Time",
        "America/Indiana/Indianapolis" | "America/Indianapolis" => "US Eastern Standard Time",
        "America/Bogota" | "America/Lima" | "America/Panama" | "America/Guayaquil" => {
            "SA Pacific Standard Time"
        }
        "America/Havana" => "Cuba Standard Time",
        "America/Caracas" => "Venezuela Standard Time",
        "America/Halifax" | "Atlantic/Bermuda" => "Atlantic Standard Time",
        "America/La_Paz" | "America/Puerto_Rico" | "America/Santo_Domingo" => {
            "SA Western Standard Time"
        }
        "America/Santiago" => "Pacific SA Standard Time",
        "America/St_Johns" => "Newfoundland Standard Time",
        "America/Sao_Paulo" => "E. South America Standard Time",
        "America/Argentina/Buenos_Aires" | "America/Buenos_Aires" => "Argentina Standard Time",
        "America/Cayenne" | "America/Fortaleza" | "America/Belem" => "SA Eastern Standard Time",
        "America/Montevideo" => "Montevideo Standard Time",
        "America/Asuncion" => "Paraguay Standard Time",
        "America/Godthab" | "America/Nuuk" => "Greenland Standard Time",
        "America/Noronha" | "Atlantic/South_Georgia" => "UTC-02",
        "Atlantic/Azores" => "Azores Standard Time",
        "Atlantic/Cape_Verde" => "Cape Verde Standard Time",

        _ => return None,
    };
    Some(id)
}
